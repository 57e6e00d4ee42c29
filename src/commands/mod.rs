//! Command entries and plan resolution
//!
//! A config file declares an ordered list of [`CommandEntry`] values. Selectors picked on the
//! command line are matched against each entry's name and short alias, producing a
//! [`CommandPlan`] that keeps the declaration order of the file, never the order in which the
//! selectors were typed.

pub mod entry;
pub mod plan;
