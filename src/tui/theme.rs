//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tier colors by position of the score in its range (traffic light, high = good)
    pub tier_high: Color,
    pub tier_mid: Color,
    pub tier_low: Color,

    // Progress gauge
    pub gauge_filled: Color,
    pub gauge_empty: Color,

    // Option list
    pub option_index: Color,
    pub option_selected: Style,
    pub option_previous: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub text: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            tier_high: Color::Green,
            tier_mid: Color::Yellow,
            tier_low: Color::Red,
            gauge_filled: Color::Cyan,
            gauge_empty: Color::Indexed(236),
            option_index: Color::DarkGray,
            option_selected: Style::new().fg(Color::Cyan).bold().reversed(),
            option_previous: Color::Yellow,
            muted: Color::Gray,
            title_color: Color::Cyan,
            text: Color::White,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
        }
    }

    pub fn light() -> Self {
        Self {
            tier_high: Color::Rgb(0, 128, 0),
            tier_mid: Color::Rgb(176, 112, 0),
            tier_low: Color::Rgb(176, 0, 0),
            gauge_filled: Color::Blue,
            gauge_empty: Color::Indexed(254),
            option_index: Color::Gray,
            option_selected: Style::new().fg(Color::Blue).bold().reversed(),
            option_previous: Color::Rgb(176, 112, 0),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            text: Color::Black,
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Rgb(176, 0, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
        }
    }

    /// Returns the color for a score based on where it sits between `min` and `max`
    pub fn tier_color(&self, score: i64, min: i64, max: i64) -> Color {
        let percentage = if max > min {
            (score - min) as f64 / (max - min) as f64 * 100.0
        } else {
            100.0
        };

        if percentage >= 70.0 {
            self.tier_high
        } else if percentage >= 40.0 {
            self.tier_mid
        } else {
            self.tier_low
        }
    }
}

/// Pick a palette. `Auto` asks the terminal for its background luma and falls
/// back to dark when it can't tell.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => {
                tracing::debug!(luma, "light terminal background detected");
                ThemeColors::light()
            }
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                tracing::debug!(error = %e, "could not detect terminal background");
                ThemeColors::dark()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_color_thresholds() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.tier_color(20, 5, 20), Color::Green);
        assert_eq!(theme.tier_color(12, 5, 20), Color::Yellow);
        assert_eq!(theme.tier_color(5, 5, 20), Color::Red);
    }

    #[test]
    fn test_tier_color_degenerate_range() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.tier_color(3, 3, 3), Color::Green);
    }

    #[test]
    fn test_explicit_modes() {
        assert_eq!(resolve_theme(ThemeMode::Light).text, Color::Black);
        assert_eq!(resolve_theme(ThemeMode::Dark).text, Color::White);
    }
}
