use super::helpers::validate_one_of;
use crate::schema::MatchlineConfig;

pub(super) const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub(super) fn validate_logging(errors: &mut Vec<String>, config: &MatchlineConfig) {
    validate_one_of(errors, "logging.level", &config.logging.level, LOG_LEVELS);
}
