//! Parsing of the invocation argument into selectors

use std::collections::HashSet;

/// Tokens that ask for the help screen instead of a selection
const HELP_TOKENS: [&str; 3] = ["help", "--help", "-h"];

/// What the user asked for on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Help,
    Select(SelectorSet),
}

/// Unordered set of raw selector tokens, matched against entry names and short aliases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorSet {
    tokens: HashSet<String>,
}

impl SelectorSet {
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Interpret the first positional argument.
///
/// A leading `-` makes every following character its own selector (`-uo` selects `u` and
/// `o`). Anything else is a comma separated list of names, empty segments dropped. Token
/// content is not validated; tokens that match nothing are ignored when resolving.
#[must_use]
pub fn parse(argument: Option<&str>) -> Selection {
    let Some(argument) = argument else {
        return Selection::Help;
    };
    if HELP_TOKENS.contains(&argument) {
        return Selection::Help;
    }

    let set = match argument.strip_prefix('-') {
        Some(bundle) => bundle.chars().map(String::from).collect(),
        None => argument
            .split(',')
            .filter(|segment| !segment.is_empty())
            .collect(),
    };
    Selection::Select(set)
}
