use std::io::{self, Write};
use std::process::Command as ProcessCommand;
use std::time::Instant;

use log::{debug, warn};

use crate::commands::plan::CommandPlan;
use crate::interrupt::{self, Phase};
use crate::theme::{self, Palette};

/// Runs a single shell command to completion.
pub trait Executor {
    /// Execute `command`, returning its exit code (`None` if it was killed by a signal).
    ///
    /// # Errors
    ///
    /// Returns an IO error if the command could not be started.
    fn execute(&mut self, command: &str) -> io::Result<Option<i32>>;
}

/// Executes commands with `sh -c`, inheriting stdin, stdout and stderr.
#[derive(Debug, Default)]
pub struct ShellExecutor;

impl Executor for ShellExecutor {
    fn execute(&mut self, command: &str) -> io::Result<Option<i32>> {
        let start = Instant::now();
        let status = ProcessCommand::new("sh").arg("-c").arg(command).status()?;
        debug!("`{command}` finished in {:.1?}", start.elapsed());
        Ok(status.code())
    }
}

/// Run every command of the plan in order, announcing each with `-> <command>`.
///
/// Failures of individual commands are logged and never stop the run, and from here on an
/// interrupt only reaches the running command. Returns the number of commands that were
/// dispatched.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn run_plan(
    plan: &CommandPlan,
    executor: &mut impl Executor,
    palette: Palette,
    out: &mut impl Write,
) -> io::Result<usize> {
    interrupt::enter(Phase::Running);
    let mut dispatched = 0;
    for command in plan {
        writeln!(out, "{} {command}", palette.paint(theme::ACCENT, "->"))?;
        out.flush()?;
        dispatched += 1;
        match executor.execute(command) {
            Ok(Some(0)) => debug!("`{command}` succeeded"),
            Ok(Some(code)) => warn!("`{command}` exited with status {code}"),
            Ok(None) => warn!("`{command}` was terminated by a signal"),
            Err(e) => warn!("Unable to run `{command}`: {e}"),
        }
    }
    Ok(dispatched)
}
