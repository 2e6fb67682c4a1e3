//! Creator match results embedded in assistant replies.
//!
//! Once requirements are complete the backend appends a JSON array between
//! two marker lines. The block is optional and best effort: a malformed
//! block yields no creators and the reply text is left alone.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CREATORS_START: &str = "<<<CREATORS_JSON_START>>>";
pub const CREATORS_END: &str = "<<<CREATORS_JSON_END>>>";

/// One matched creator card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default, deserialize_with = "crate::de::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Either a plain string or `{city, state, country}`.
    #[serde(default)]
    pub location: Option<serde_json::Value>,
    /// Either a plain string or `{min, max}`.
    #[serde(default)]
    pub budget_range: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "crate::de::or_default")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::or_default")]
    pub styles: Vec<String>,
    #[serde(default, deserialize_with = "crate::de::or_default")]
    pub deliverables: Vec<String>,
    #[serde(default, deserialize_with = "crate::de::or_default")]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub editor_specialization: Option<String>,
    #[serde(default)]
    pub work_mode: Option<String>,
    #[serde(default, deserialize_with = "crate::de::or_default")]
    pub content_types: Vec<String>,
    #[serde(default, deserialize_with = "crate::de::or_default")]
    pub match_score: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::or_default")]
    pub match_reasons: Vec<String>,
    #[serde(default)]
    pub available: Option<bool>,
}

impl Creator {
    /// "City, Country" style label, whichever shape `location` has.
    pub fn location_label(&self) -> Option<String> {
        match self.location.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Object(map) => {
                let parts: Vec<&str> = ["city", "state", "country"]
                    .iter()
                    .filter_map(|k| map.get(*k).and_then(|v| v.as_str()))
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            _ => None,
        }
    }

    /// "min-max" style label for the budget range.
    pub fn budget_label(&self) -> Option<String> {
        match self.budget_range.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Object(map) => {
                let min = map.get("min").and_then(|v| v.as_f64());
                let max = map.get("max").and_then(|v| v.as_f64());
                match (min, max) {
                    (Some(min), Some(max)) => Some(format!("{min}-{max}")),
                    (Some(min), None) => Some(format!("from {min}")),
                    (None, Some(max)) => Some(format!("up to {max}")),
                    (None, None) => None,
                }
            }
            _ => None,
        }
    }
}

/// Byte range of the first well-formed block, markers included, plus the
/// range of the JSON between them.
fn block_bounds(text: &str) -> Option<(usize, usize, usize, usize)> {
    let start = text.find(CREATORS_START)?;
    let json_start = start + CREATORS_START.len();
    let json_len = text[json_start..].find(CREATORS_END)?;
    let json_end = json_start + json_len;
    Some((start, json_start, json_end, json_end + CREATORS_END.len()))
}

/// True if the text holds a complete marker pair.
pub fn has_creators_block(text: &str) -> bool {
    block_bounds(text).is_some()
}

/// Parse the creators block out of a reply.
///
/// Accepts a bare array or an object with a `creators` array.
pub fn extract_creators(text: &str) -> Vec<Creator> {
    let Some((_, json_start, json_end, _)) = block_bounds(text) else {
        return Vec::new();
    };
    let raw = text[json_start..json_end].trim();

    let parsed = serde_json::from_str::<Vec<Creator>>(raw).or_else(|_| {
        #[derive(Deserialize)]
        struct Wrapped {
            creators: Vec<Creator>,
        }
        serde_json::from_str::<Wrapped>(raw).map(|w| w.creators)
    });

    match parsed {
        Ok(creators) => creators,
        Err(e) => {
            debug!(error = %e, "ignoring malformed creators block");
            Vec::new()
        }
    }
}

/// The reply with the creators block cut out and surrounding whitespace
/// trimmed. Text without a complete block is returned unchanged.
pub fn strip_creators_block(text: &str) -> String {
    match block_bounds(text) {
        Some((start, _, _, end)) => {
            let before = text[..start].trim_end();
            let after = text[end..].trim_start();
            match (before.is_empty(), after.is_empty()) {
                (true, _) => after.trim_end().to_string(),
                (false, true) => before.to_string(),
                (false, false) => format!("{before}\n{}", after.trim_end()),
            }
        }
        None => text.to_string(),
    }
}
