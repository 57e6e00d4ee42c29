/// A single named command from the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: String,
    pub short: String,
    pub command: String,
}

impl CommandEntry {
    /// Build an entry from its three parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        short: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            short: short.into(),
            command: command.into(),
        }
    }
}
