pub mod init;
mod schema;

pub use schema::{Config, FollowUpConfig, ThemeMode};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::assessment::validate_assessment;
use crate::follow_up;

/// Get the config directory path (~/.config/lead-quiz/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("lead-quiz")
}

/// Get the default config file path (~/.config/lead-quiz/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<()> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory at {}", config_dir.display()))?;
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/lead-quiz/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing file at the default path yields the built-in defaults.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    tracing::debug!(
        path = %config_path.display(),
        assessments = config.assessments.len(),
        "loaded config"
    );

    Ok(config)
}

/// Write configuration as YAML, atomically replacing any existing file.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

/// Validate the whole config at startup.
/// Returns all validation errors at once, prefixed with their location.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let assessments = config.assessments();

    let mut seen = HashSet::new();
    for (i, assessment) in assessments.iter().enumerate() {
        if let Err(assessment_errors) = validate_assessment(assessment) {
            errors.extend(
                assessment_errors
                    .into_iter()
                    .map(|e| format!("assessments[{}].{}", i, e)),
            );
        }
        if !assessment.id.is_empty() && !seen.insert(assessment.id.as_str()) {
            errors.push(format!(
                "assessments[{}].id: '{}' is defined more than once",
                i, assessment.id
            ));
        }
    }

    if let Some(ref default_id) = config.default_assessment {
        if !assessments.iter().any(|a| &a.id == default_id) {
            errors.push(format!(
                "default_assessment: '{}' does not match any assessment id",
                default_id
            ));
        }
    }

    if let Some(ref follow_up) = config.follow_up {
        if let Err(e) = follow_up::validate_template(&follow_up.url) {
            errors.push(format!("follow_up.url: {}", e));
        }
        if let Some(ref message) = follow_up.message {
            for (key, text) in [("en", Some(&message.en)), ("ar", message.ar.as_ref())] {
                if let Some(text) = text {
                    if let Err(e) = follow_up::validate_placeholders(text) {
                        errors.push(format!("follow_up.message.{}: {}", key, e));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
