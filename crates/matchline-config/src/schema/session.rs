use serde::{Deserialize, Serialize};

/// Client-side session behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Remember ids that reached a terminal status and refuse further
    /// turns on them without asking the backend.
    pub track_terminal_status: bool,
    /// Delete the active session when the chat loop exits.
    pub delete_on_exit: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            track_terminal_status: false,
            delete_on_exit: true,
        }
    }
}
