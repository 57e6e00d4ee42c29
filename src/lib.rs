//! Core implementation of the march command launcher
//!
//! march reads a YAML file mapping command names to a short alias and a shell command. The
//! user picks commands on the command line, either as a bundle of short aliases (`-uo`) or as a
//! comma separated list of names (`upgrade,orphans`). The matching commands are listed, the
//! user confirms, and they run one after another through the shell in the order the config
//! file declares them.

use std::io::{self, Write};
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::commands::plan::CommandPlan;
use crate::config_file::Config;
use crate::confirm::{Decision, Prompter};
use crate::executor::Executor;
use crate::selectors::Selection;
use crate::theme::Palette;

pub mod commands;
pub mod config_file;
pub mod confirm;
pub mod executor;
pub mod help;
pub mod init_config;
pub mod interrupt;
pub mod logger;
pub mod selectors;
pub mod theme;

/// Errors that end an invocation after the config was loaded
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Nothing to execute...")]
    NoMatchingCommands,
    #[error("Terminal IO failed: {0}")]
    Io(#[from] io::Error),
}

/// How an invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The help screen was printed
    Help,
    /// The user did not confirm; nothing ran
    Declined,
    /// Every command of the plan was dispatched
    Executed { count: usize },
}

/// Knobs for a single invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    /// Skip the confirmation prompt
    pub assume_yes: bool,
    pub palette: Palette,
}

/// Resolve `argument` against `config` and run the result.
///
/// No argument or a help token prints the help screen. Otherwise the selected commands are
/// listed, confirmed through `prompter` (unless `assume_yes` is set) and handed to `executor`
/// in declaration order.
///
/// # Errors
///
/// Returns `LaunchError::NoMatchingCommands` if no entry matches the selectors, or
/// `LaunchError::Io` if writing output or reading the confirmation fails.
pub fn launch(
    argument: Option<&str>,
    config: &Config,
    config_path: &Path,
    options: LaunchOptions,
    prompter: &mut impl Prompter,
    executor: &mut impl Executor,
    out: &mut impl Write,
) -> Result<Outcome, LaunchError> {
    let selector_set = match selectors::parse(argument) {
        Selection::Help => {
            help::render_help(config, config_path, options.palette, out)?;
            return Ok(Outcome::Help);
        }
        Selection::Select(selector_set) => selector_set,
    };

    let plan = CommandPlan::resolve(&config.entries, &selector_set);
    if plan.is_empty() {
        return Err(LaunchError::NoMatchingCommands);
    }

    let decision = if options.assume_yes {
        confirm::render_plan(&plan, out)?;
        Decision::Proceed
    } else {
        confirm::confirm(&plan, prompter, out)?
    };
    if decision == Decision::Decline {
        debug!("Plan declined, nothing executed");
        return Ok(Outcome::Declined);
    }

    let count = executor::run_plan(&plan, executor, options.palette, out)?;
    info!("Dispatched {count} commands");
    Ok(Outcome::Executed { count })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::commands::entry::CommandEntry;
    use crate::confirm::ReaderPrompter;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Executor for Recorder {
        fn execute(&mut self, command: &str) -> io::Result<Option<i32>> {
            self.0.push(command.to_string());
            Ok(Some(0))
        }
    }

    fn config() -> Config {
        Config {
            entries: vec![
                CommandEntry::new("a", "x", "A"),
                CommandEntry::new("b", "y", "B"),
            ],
        }
    }

    fn run(
        argument: Option<&str>,
        answer: &str,
        options: LaunchOptions,
    ) -> (Result<Outcome, LaunchError>, Vec<String>, String) {
        let mut prompter = ReaderPrompter::new(Cursor::new(answer.to_string()), Vec::new());
        let mut recorder = Recorder::default();
        let mut out = Vec::new();
        let result = launch(
            argument,
            &config(),
            Path::new("config.yml"),
            options,
            &mut prompter,
            &mut recorder,
            &mut out,
        );
        (result, recorder.0, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_flag_bundle_runs_in_declaration_order() {
        let (result, ran, _) = run(Some("-yx"), "y\n", LaunchOptions::default());
        assert_eq!(result.unwrap(), Outcome::Executed { count: 2 });
        assert_eq!(ran, ["A", "B"]);
    }

    #[test]
    fn test_name_list_runs_in_declaration_order() {
        let (result, ran, out) = run(Some("b,a"), "yes\n", LaunchOptions::default());
        assert_eq!(result.unwrap(), Outcome::Executed { count: 2 });
        assert_eq!(ran, ["A", "B"]);
        assert!(out.ends_with("-> A\n-> B\n"));
    }

    #[test]
    fn test_no_match_is_an_error() {
        let (result, ran, out) = run(Some("zzz"), "y\n", LaunchOptions::default());
        assert!(matches!(result, Err(LaunchError::NoMatchingCommands)));
        assert!(ran.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_help_does_not_prompt_or_run() {
        for argument in [None, Some("help"), Some("-h"), Some("--help")] {
            let (result, ran, out) = run(argument, "y\n", LaunchOptions::default());
            assert_eq!(result.unwrap(), Outcome::Help);
            assert!(ran.is_empty());
            assert!(out.contains(" • a, -x (A)"));
            assert!(out.contains(" • b, -y (B)"));
        }
    }

    #[test]
    fn test_decline_runs_nothing() {
        for answer in ["n\n", "\n", ""] {
            let (result, ran, _) = run(Some("a"), answer, LaunchOptions::default());
            assert_eq!(result.unwrap(), Outcome::Declined);
            assert!(ran.is_empty());
        }
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let options = LaunchOptions {
            assume_yes: true,
            ..LaunchOptions::default()
        };
        let (result, ran, out) = run(Some("-x"), "", options);
        assert_eq!(result.unwrap(), Outcome::Executed { count: 1 });
        assert_eq!(ran, ["A"]);
        assert!(out.starts_with("These commands are going to be executed:\nA\n\n"));
    }
}
