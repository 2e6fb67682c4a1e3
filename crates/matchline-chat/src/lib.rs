//! Session client for the creator-matching chat service.
//!
//! Provides:
//! - Session creation, inspection and best-effort deletion
//! - Validated chat turns with server-driven status policy
//! - A total classifier turning transport failures into [`ClassifiedError`]
//! - Extraction of creator match results from assistant replies
//!
//! Every public operation returns `Result<_, ClassifiedError>`; raw
//! transport failures never cross the crate boundary.

pub mod classifier;
pub mod client;
pub mod creators;
mod de;
pub mod endpoints;
pub mod error;
pub mod exchange;
pub mod health;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use classifier::classify;
pub use client::{ChatClient, ClientOptions};
pub use creators::Creator;
pub use endpoints::Endpoints;
pub use error::{ClassifiedError, ErrorCode};
pub use exchange::{ChatTurnResponse, MessageExchange};
pub use health::{HealthReport, SessionStats};
pub use session::{NewSession, SessionManager, SessionMeta, SessionStatus, TerminalTracker};
pub use transport::{HttpTransport, Transport, TransportConfig, TransportFailure};
