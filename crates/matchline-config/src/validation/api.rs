//! `[api]` section validation.

use super::helpers::validate_range;
use crate::schema::MatchlineConfig;

pub(super) fn validate_api(errors: &mut Vec<String>, config: &MatchlineConfig) {
    let api = &config.api;

    let url = api.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "api.base_url = \"{}\" must start with http:// or https://",
            api.base_url
        ));
    }

    if !api.api_prefix.is_empty() && !api.api_prefix.starts_with('/') {
        errors.push(format!(
            "api.api_prefix = \"{}\" must be empty or start with '/'",
            api.api_prefix
        ));
    }

    validate_range(errors, "api.timeout_secs", api.timeout_secs, 1, 300);
    validate_range(
        errors,
        "api.connect_timeout_secs",
        api.connect_timeout_secs,
        1,
        60,
    );
    if api.connect_timeout_secs > api.timeout_secs {
        errors.push(format!(
            "api.connect_timeout_secs = {} exceeds api.timeout_secs = {}",
            api.connect_timeout_secs, api.timeout_secs
        ));
    }
}
