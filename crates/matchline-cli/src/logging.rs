//! Subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "matchline=info";

/// Pick the filter directive: explicit flag, then `RUST_LOG`, then the
/// configured level, then the default. Bare levels are scoped to our crates.
pub fn resolve_directive(flag: Option<&str>, env: Option<&str>, config_level: &str) -> String {
    fn pick(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|v| !v.is_empty())
    }

    if let Some(flag) = pick(flag) {
        return scoped(flag);
    }
    if let Some(env) = pick(env) {
        return env.to_string();
    }
    match pick(Some(config_level)) {
        Some(level) => scoped(level),
        None => DEFAULT_DIRECTIVE.to_string(),
    }
}

fn scoped(directive: &str) -> String {
    if directive.contains('=') || directive.contains(',') {
        directive.to_string()
    } else {
        format!("matchline={}", directive.to_ascii_lowercase())
    }
}

pub fn init(flag: Option<&str>, config_level: &str) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = resolve_directive(flag, env.as_deref(), config_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(%directive, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_everything() {
        assert_eq!(
            resolve_directive(Some("debug"), Some("warn"), "error"),
            "matchline=debug"
        );
    }

    #[test]
    fn env_used_verbatim_when_no_flag() {
        assert_eq!(
            resolve_directive(None, Some("matchline_chat=trace"), "info"),
            "matchline_chat=trace"
        );
    }

    #[test]
    fn config_level_is_scoped() {
        assert_eq!(resolve_directive(None, None, "WARN"), "matchline=warn");
    }

    #[test]
    fn blank_inputs_fall_through_to_default() {
        assert_eq!(resolve_directive(Some("  "), Some(""), ""), DEFAULT_DIRECTIVE);
    }

    #[test]
    fn full_directive_flag_is_kept() {
        assert_eq!(
            resolve_directive(Some("matchline_chat=debug,reqwest=info"), None, "info"),
            "matchline_chat=debug,reqwest=info"
        );
    }
}
