//! Confirmation gate shown before anything is executed

use std::io::{self, BufRead, IsTerminal, Write};

use inquire::InquireError;
use log::debug;

use crate::commands::plan::CommandPlan;

/// Question asked before running the plan
pub const PROMPT: &str = "Proceed? [y/N] ";

/// Answers accepted as a yes, compared after trimming and lowercasing
const AFFIRMATIVE: [&str; 3] = ["y", "yes", "yep"];

/// The user's verdict on a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Decline,
}

/// Source of answers to yes/no questions.
pub trait Prompter {
    /// Ask `question` and return the raw answer, or `None` if the user interrupted or input
    /// ended.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the question cannot be shown or the answer cannot be read.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;
}

/// Prompts with `inquire` when stdin and stderr are terminals, falling back to plain stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        // inquire draws on stderr; Ctrl-C outside it is handled by `interrupt`
        if !(io::stdin().is_terminal() && io::stderr().is_terminal()) {
            debug!("Not a terminal, reading confirmation from stdin");
            return ReaderPrompter::new(io::stdin().lock(), io::stdout()).ask(question);
        }

        match inquire::Text::new(question.trim_end()).prompt() {
            Ok(answer) => Ok(Some(answer)),
            Err(InquireError::OperationInterrupted | InquireError::OperationCanceled) => {
                debug!("Confirmation prompt interrupted");
                Ok(None)
            }
            Err(InquireError::IO(e)) => Err(e),
            Err(e) => Err(io::Error::other(e)),
        }
    }
}

/// Writes the question to `output` and reads one line from `input`.
#[derive(Debug)]
pub struct ReaderPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ReaderPrompter<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning whatever was written to its output.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for ReaderPrompter<R, W> {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(Some(answer))
    }
}

/// Whether an answer counts as a yes
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// List the pending commands on `out`, one per line.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn render_plan(plan: &CommandPlan, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "These commands are going to be executed:")?;
    for command in plan {
        writeln!(out, "{command}")?;
    }
    writeln!(out)?;
    out.flush()
}

/// Show the plan and ask whether to run it.
///
/// Anything but an affirmative answer declines, including empty input and an interrupt.
///
/// # Errors
///
/// Returns an IO error if the plan cannot be written or the prompt fails.
pub fn confirm(
    plan: &CommandPlan,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> io::Result<Decision> {
    render_plan(plan, out)?;
    let decision = match prompter.ask(PROMPT)? {
        Some(answer) if is_affirmative(&answer) => Decision::Proceed,
        _ => Decision::Decline,
    };
    debug!("Confirmation: {decision:?}");
    Ok(decision)
}
