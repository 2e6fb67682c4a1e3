//! Logical backend paths.

/// Prefix used by the web client when none is configured.
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Builds endpoint paths under a configurable API prefix.
///
/// Session ids are percent-encoded as a single path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    prefix: String,
}

impl Endpoints {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim().trim_end_matches('/');
        let prefix = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self { prefix }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn create_session(&self) -> String {
        format!("{}/session/create", self.prefix)
    }

    /// Used for both `GET` (info) and `DELETE`.
    pub fn session(&self, session_id: &str) -> String {
        format!("{}/session/{}", self.prefix, urlencoding::encode(session_id))
    }

    pub fn chat(&self, session_id: &str) -> String {
        format!("{}/chat", self.session(session_id))
    }

    pub fn refine(&self, session_id: &str) -> String {
        format!("{}/refine", self.session(session_id))
    }

    /// Service health lives at the root, outside the API prefix.
    pub fn health(&self) -> String {
        "/health".to_string()
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let ep = Endpoints::default();
        assert_eq!(ep.create_session(), "/api/v1/session/create");
        assert_eq!(ep.chat("sess-1"), "/api/v1/session/sess-1/chat");
        assert_eq!(ep.refine("sess-1"), "/api/v1/session/sess-1/refine");
        assert_eq!(ep.session("sess-1"), "/api/v1/session/sess-1");
        assert_eq!(ep.health(), "/health");
    }

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(Endpoints::new("/api/v2/").prefix(), "/api/v2");
        assert_eq!(Endpoints::new("api").prefix(), "/api");
        assert_eq!(Endpoints::new("").create_session(), "/session/create");
    }

    #[test]
    fn session_id_is_a_single_segment() {
        let ep = Endpoints::default();
        assert_eq!(ep.session("a/b c"), "/api/v1/session/a%2Fb%20c");
    }
}
