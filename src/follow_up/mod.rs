//! Follow-up call-to-action links built from a completed outcome.

use anyhow::{Context, Result};

use crate::assessment::{Lang, Outcome, Text};
use crate::config::FollowUpConfig;

pub const PLACEHOLDERS: &[&str] = &["message", "score", "tier", "assessment"];

const DEFAULT_MESSAGE_EN: &str = "Hi! I completed the {assessment} and scored {score} ({tier}).";
const DEFAULT_MESSAGE_AR: &str = "مرحباً! أكملت {assessment} وحصلت على {score} ({tier}).";

const ALLOWED_SCHEMES: &[&str] = &["https://", "http://", "mailto:", "tel:"];

/// Check a link template: known scheme, known placeholders only.
pub fn validate_template(url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.is_empty() {
        return Err("must not be empty".to_string());
    }
    if !ALLOWED_SCHEMES.iter().any(|s| url.starts_with(s)) {
        return Err(format!(
            "'{}' must start with one of {}",
            url,
            ALLOWED_SCHEMES.join(", ")
        ));
    }
    validate_placeholders(url)
}

/// Reject `{name}` placeholders that would never be substituted.
pub fn validate_placeholders(template: &str) -> Result<(), String> {
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                if !PLACEHOLDERS.contains(&name) {
                    return Err(format!(
                        "unknown placeholder '{{{}}}' (expected one of {})",
                        name,
                        PLACEHOLDERS.join(", ")
                    ));
                }
                rest = &after[close + 1..];
            }
            None => return Err("unclosed '{'".to_string()),
        }
    }
    Ok(())
}

fn substitute<F>(template: &str, values: &[(&str, String)], encode: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{}}}", key), &encode(value));
    }
    out
}

/// Human-readable message for the outcome, in `lang`.
pub fn render_message(
    config: Option<&FollowUpConfig>,
    outcome: &Outcome,
    assessment_title: &Text,
    lang: Lang,
) -> String {
    let default = Text::bilingual(DEFAULT_MESSAGE_EN, DEFAULT_MESSAGE_AR);
    let template = config
        .and_then(|c| c.message.as_ref())
        .unwrap_or(&default)
        .get(lang);

    let values = [
        ("score", outcome.score.to_string()),
        ("tier", outcome.tier.name.get(lang).to_string()),
        ("assessment", assessment_title.get(lang).to_string()),
    ];
    substitute(template, &values, |v| v.to_string())
}

/// Link to open for the outcome. Substituted values are percent-encoded.
pub fn build_link(
    config: &FollowUpConfig,
    outcome: &Outcome,
    assessment_title: &Text,
    lang: Lang,
) -> String {
    let message = render_message(Some(config), outcome, assessment_title, lang);
    let values = [
        ("message", message),
        ("score", outcome.score.to_string()),
        ("tier", outcome.tier.name.get(lang).to_string()),
        ("assessment", outcome.assessment_id.clone()),
    ];
    substitute(config.url.trim(), &values, |v| {
        urlencoding::encode(v).into_owned()
    })
}

/// Open a URL in the user's default browser (or mail/chat handler)
///
/// # Errors
/// Returns error if no handler can be launched
pub fn open_url(url: &str) -> Result<()> {
    webbrowser::open(url)
        .with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}
