use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::assessment::{catalog, Assessment, Lang, Text};

/// Top-level config file.
///
/// Example YAML:
/// ```yaml
/// language: ar
/// theme: auto
/// default_assessment: lead-qualification
/// follow_up:
///   url: "https://wa.me/15550100?text={message}"
///   message: { en: "Hi! I scored {score} ({tier}) on the {assessment}." }
/// assessments: []   # empty uses the built-in catalog
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub language: Lang,

    #[serde(default)]
    pub theme: ThemeMode,

    /// Assessment started when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_assessment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUpConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assessments: Vec<Assessment>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

/// Where a completed assessment sends the user next.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FollowUpConfig {
    /// Link template; `{message}`, `{score}`, `{tier}` and `{assessment}` are
    /// substituted percent-encoded
    pub url: String,

    /// Message template for `{message}`; same placeholders, substituted verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Text>,
}

impl Config {
    /// Configured assessments, or the built-in catalog when none are configured.
    pub fn assessments(&self) -> Vec<Assessment> {
        if self.assessments.is_empty() {
            catalog::builtin()
        } else {
            self.assessments.clone()
        }
    }

    /// Resolve an assessment by id, falling back to `default_assessment`, then the first one.
    pub fn find_assessment(&self, id: Option<&str>) -> Result<Assessment> {
        let available = self.assessments();
        let wanted = id.or(self.default_assessment.as_deref());

        match wanted {
            Some(wanted) => match available.into_iter().find(|a| a.id == wanted) {
                Some(assessment) => Ok(assessment),
                None => bail!(
                    "Unknown assessment '{}'. Run `lead-quiz list` to see available ids.",
                    wanted
                ),
            },
            None => match available.into_iter().next() {
                Some(assessment) => Ok(assessment),
                None => bail!("No assessments available"),
            },
        }
    }
}
