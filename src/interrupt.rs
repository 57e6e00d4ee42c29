//! Process-wide Ctrl-C handling
//!
//! Before any command runs, an interrupt means the user backed out: the process exits with
//! status 0 and no message. Once the plan is executing, the signal reaches the running command
//! through the shared process group and march keeps going with the next command.

use std::sync::atomic::{AtomicU8, Ordering};

use log::debug;

/// Where the invocation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    /// Loading config, listing the plan or waiting for confirmation
    Waiting = 0,
    /// Commands of the plan are being executed
    Running = 1,
}

/// What the handler does with an interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// Leave quietly, nothing has run yet
    Exit,
    /// Let the child take the signal, continue with the plan
    Ignore,
}

static PHASE: AtomicU8 = AtomicU8::new(Phase::Waiting as u8);

/// Record the current phase for the interrupt handler.
pub fn enter(phase: Phase) {
    PHASE.store(phase as u8, Ordering::SeqCst);
}

#[must_use]
pub fn current() -> Phase {
    if PHASE.load(Ordering::SeqCst) == Phase::Running as u8 {
        Phase::Running
    } else {
        Phase::Waiting
    }
}

#[must_use]
pub fn action(phase: Phase) -> InterruptAction {
    match phase {
        Phase::Waiting => InterruptAction::Exit,
        Phase::Running => InterruptAction::Ignore,
    }
}

/// Install the Ctrl-C handler. Must be called at most once per process.
///
/// # Errors
///
/// Returns `ctrlc::Error` if the handler cannot be registered.
pub fn install() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| match action(current()) {
        InterruptAction::Exit => {
            debug!("Interrupted before execution, exiting");
            std::process::exit(0);
        }
        InterruptAction::Ignore => debug!("Interrupt left to the running command"),
    })
}
