//! Ruleset wire model.

use serde::{Deserialize, Serialize};
use tracing::warn;

use formguard_core::{FieldType, FormType};

/// Ruleset schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RulesVersion {
    #[serde(rename = "1")]
    V1,
    #[serde(rename = "2")]
    V2,
}

/// Forced field assignment inside an [`IncludeRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    pub selector: String,
    pub field_type: FieldType,
}

/// Forced form assignment: the selector locates the form element, field
/// rules locate its fields within that form's subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeRule {
    pub selector: String,
    pub form_type: FormType,
    #[serde(default)]
    pub fields: Vec<FieldRule>,
}

/// One domain's override ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteRules {
    pub version: RulesVersion,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub include: Vec<IncludeRule>,
}

impl WebsiteRules {
    /// Parse a fetched ruleset payload. Malformed payloads are logged and
    /// dropped; detection proceeds heuristics-only.
    pub fn parse(payload: &str) -> Option<Self> {
        match serde_json::from_str::<WebsiteRules>(payload) {
            Ok(rules) => Some(rules),
            Err(err) => {
                warn!(error = %err, "discarding malformed website rules");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
