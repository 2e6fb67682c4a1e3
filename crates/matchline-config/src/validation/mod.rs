//! Full configuration validation.
//!
//! Each section has its own validator. [`validate`] collects every error
//! into one `ConfigError`; [`invalid_sections`] reports them per section so
//! the loader can reset only what is broken.

mod api;
mod helpers;
mod misc;


use crate::schema::MatchlineConfig;
use matchline_common::ConfigError;

/// Config sections that carry validated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Api,
    Logging,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Logging => "logging",
        }
    }

    /// Put this section back to its built-in defaults.
    pub fn reset(self, config: &mut MatchlineConfig) {
        match self {
            Self::Api => config.api = Default::default(),
            Self::Logging => config.logging = Default::default(),
        }
    }
}

/// Validation errors grouped by section. Empty when the config is valid.
pub fn invalid_sections(config: &MatchlineConfig) -> Vec<(Section, Vec<String>)> {
    let checks: [(Section, fn(&mut Vec<String>, &MatchlineConfig)); 2] = [
        (Section::Api, api::validate_api),
        (Section::Logging, misc::validate_logging),
    ];

    checks
        .into_iter()
        .filter_map(|(section, check)| {
            let mut errors = Vec::new();
            check(&mut errors, config);
            (!errors.is_empty()).then_some((section, errors))
        })
        .collect()
}

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MatchlineConfig) -> Result<(), ConfigError> {
    let errors: Vec<String> = invalid_sections(config)
        .into_iter()
        .flat_map(|(_, errors)| errors)
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
