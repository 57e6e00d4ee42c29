use log::debug;

use crate::commands::entry::CommandEntry;
use crate::selectors::SelectorSet;

/// Ordered list of shell commands waiting to be executed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandPlan {
    commands: Vec<String>,
}

impl CommandPlan {
    /// Resolve selectors against entries in declaration order.
    ///
    /// An entry is included when either its name or its short alias is selected. Iteration
    /// runs over the entries, so an entry matched by both still appears once.
    #[must_use]
    pub fn resolve(entries: &[CommandEntry], selectors: &SelectorSet) -> Self {
        let commands: Vec<String> = entries
            .iter()
            .filter(|entry| selectors.contains(&entry.name) || selectors.contains(&entry.short))
            .map(|entry| entry.command.clone())
            .collect();
        debug!(
            "Resolved {} of {} entries from {} selectors",
            commands.len(),
            entries.len(),
            selectors.len()
        );
        Self { commands }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl<'a> IntoIterator for &'a CommandPlan {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
