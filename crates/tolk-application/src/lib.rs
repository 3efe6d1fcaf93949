//! Application layer for tolk.
//!
//! Coordinates the session protocol, scoring and the transcript for the two
//! front-ends. The console drives [`ConsoleSession`] directly; the desktop
//! form talks to a [`FormHandle`] backed by a single controller task.

pub mod console;
pub mod form;
pub mod runtime;

#[cfg(test)]
mod test_support;

pub use console::ConsoleSession;
pub use form::{FormController, FormInput, PendingTurn, ScoreReport, TurnReport};
pub use runtime::{FormHandle, FormListener, FormRuntime};
