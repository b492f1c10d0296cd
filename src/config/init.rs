use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::assessment::{catalog, Lang};
use crate::config::{get_config_path, save_config, Config, FollowUpConfig, ThemeMode};
use crate::follow_up;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(12));
    }
    println!();
}

fn parse_language(input: &str) -> Option<Lang> {
    match input.trim().to_lowercase().as_str() {
        "en" | "english" => Some(Lang::En),
        "ar" | "arabic" => Some(Lang::Ar),
        _ => None,
    }
}

fn parse_theme(input: &str) -> Option<ThemeMode> {
    match input.trim().to_lowercase().as_str() {
        "auto" => Some(ThemeMode::Auto),
        "dark" => Some(ThemeMode::Dark),
        "light" => Some(ThemeMode::Light),
        _ => None,
    }
}

/// Turn wizard input into a link template.
/// A bare phone number becomes a WhatsApp chat link carrying the result message.
pub fn follow_up_template(input: &str) -> Result<String, String> {
    let input = input.trim();
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let looks_like_phone = !digits.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));

    let template = if looks_like_phone {
        format!("https://wa.me/{}?text={{message}}", digits)
    } else {
        input.to_string()
    };
    follow_up::validate_template(&template)?;
    Ok(template)
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("Lead Quiz Configuration Wizard");
    println!("==============================");
    println!();

    // 1. Language
    typewriter("Assessments can be shown in English or Arabic. You can switch at any time with 'l'.");
    let language = loop {
        let input = prompt_with_default("Language (en/ar)", "en")?;
        match parse_language(&input) {
            Some(lang) => break lang,
            None => println!("  Invalid: enter 'en' or 'ar'. Try again."),
        }
    };

    // 2. Theme
    println!();
    let theme = loop {
        let input = prompt_with_default("Color theme (auto/dark/light)", "auto")?;
        match parse_theme(&input) {
            Some(theme) => break theme,
            None => println!("  Invalid: enter 'auto', 'dark' or 'light'. Try again."),
        }
    };

    // 3. Default assessment
    println!();
    typewriter("Built-in assessments:");
    for assessment in catalog::builtin() {
        typewriter(&format!(
            "  {:<20} {}",
            assessment.id,
            assessment.title.get(language)
        ));
    }
    let ids: Vec<String> = catalog::builtin().into_iter().map(|a| a.id).collect();
    let default_assessment = loop {
        let input = prompt_with_default("Default assessment", catalog::AI_READINESS_ID)?;
        if ids.contains(&input) {
            break input;
        }
        println!("  Invalid: must be one of {}. Try again.", ids.join(", "));
    };

    // 4. Follow-up link
    println!();
    typewriter("When someone finishes an assessment they can open a follow-up link with their result.");
    typewriter("Enter a WhatsApp number (e.g. +1 555 0100), or a full link template using");
    typewriter("{message}, {score}, {tier} and {assessment} placeholders. Leave empty to skip.");
    let follow_up = loop {
        let input = prompt("Follow-up: ")?;
        if input.is_empty() {
            break None;
        }
        match follow_up_template(&input) {
            Ok(url) => {
                break Some(FollowUpConfig { url, message: None });
            }
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 5. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 6. Write config
    let config = Config {
        language,
        theme,
        default_assessment: Some(default_assessment),
        follow_up,
        assessments: Vec::new(),
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    typewriter("Add your own questions and tiers under 'assessments:' in the config file to replace the built-in ones.");
    println!("Run `lead-quiz` to get started.");

    Ok(())
}
