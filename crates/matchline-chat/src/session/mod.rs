//! Session lifecycle: creation, inspection, deletion and the observed
//! status state machine.

mod manager;
mod tracker;
mod types;

pub use manager::{DeleteObserver, SessionManager};
pub use tracker::TerminalTracker;
pub use types::{CreateSessionResponse, NewSession, SessionMeta, SessionStatus};
