//! Configuration schema types for matchline.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod logging;
mod session;

pub use api::*;
pub use logging::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchlineConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}
