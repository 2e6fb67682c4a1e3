pub mod errors;
pub mod id;

pub use errors::{ConfigError, MatchlineError};
pub use id::{new_correlation_id, SessionId};

pub type Result<T> = std::result::Result<T, MatchlineError>;
