use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::assessment::{Assessment, Lang, Outcome};
use crate::history::HistoryEntry;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Text bar showing where `score` sits between `min` and `max`
pub fn score_bar(score: i64, min: i64, max: i64, width: usize) -> String {
    let ratio = if max > min {
        ((score - min) as f64 / (max - min) as f64).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// One line per assessment: id, title, question count, score range
pub fn format_assessment_list(assessments: &[Assessment], lang: Lang, use_colors: bool) -> String {
    if assessments.is_empty() {
        return "No assessments configured.".to_string();
    }

    let id_width = assessments.iter().map(|a| a.id.chars().count()).max().unwrap_or(0);
    let term_width = get_terminal_width();

    assessments
        .iter()
        .map(|a| {
            let id = format!("{:<width$}", a.id, width = id_width);
            let details = format!(
                "({} questions, {}-{} points)",
                a.len(),
                a.min_score(),
                a.max_score()
            );
            let title = a.title.get(lang);
            let title = match term_width {
                Some(width) => {
                    let fixed = id_width + details.chars().count() + 4;
                    truncate_text(title, width.saturating_sub(fixed).max(20))
                }
                None => title.to_string(),
            };

            if use_colors {
                format!("{}  {}  {}", id.cyan(), title.bold(), details.dimmed())
            } else {
                format!("{}  {}  {}", id, title, details)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line result block for a completed run
pub fn format_outcome(
    outcome: &Outcome,
    assessment: &Assessment,
    lang: Lang,
    use_colors: bool,
) -> String {
    let title = assessment.title.get(lang);
    let tier = outcome.tier.name.get(lang);
    let bar = score_bar(
        outcome.score,
        assessment.min_score(),
        assessment.max_score(),
        20,
    );
    let score = format!("{} / {}", outcome.score, assessment.max_score());

    let mut lines = if use_colors {
        vec![
            title.bold().to_string(),
            format!("  Score: {}  {}", score.bold(), bar.cyan()),
            format!("  Tier:  {}", tier.green().bold()),
        ]
    } else {
        vec![
            title.to_string(),
            format!("  Score: {}  {}", score, bar),
            format!("  Tier:  {}", tier),
        ]
    };

    if let Some(ref message) = outcome.tier.message {
        lines.push(format!("  {}", message.get(lang)));
    }

    lines.join("\n")
}

/// History table, newest first: when, assessment, score, tier
pub fn format_history(entries: &[&HistoryEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No completed assessments yet.".to_string();
    }

    let id_width = entries
        .iter()
        .map(|e| e.assessment_id.chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|entry| {
            let ago = format!("{:>12}", entry.format_ago());
            let id = format!("{:<width$}", entry.assessment_id, width = id_width);
            let score = format!("{:>4}", entry.score);
            if use_colors {
                format!(
                    "{}  {}  {}  {}",
                    ago.dimmed(),
                    id.cyan(),
                    score.bold(),
                    entry.tier
                )
            } else {
                format!("{}  {}  {}  {}", ago, id, score, entry.tier)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog;
    use chrono::{Duration, Utc};

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer title", 8), "a lon...");
        assert_eq!(truncate_text("abcdef", 2), "ab");
        assert_eq!(truncate_text("مرحبا بالعالم", 5), "مر...");
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(5, 5, 20, 10), "░░░░░░░░░░");
        assert_eq!(score_bar(20, 5, 20, 10), "██████████");
        assert_eq!(score_bar(10, 0, 20, 4), "██░░");
        assert_eq!(score_bar(99, 0, 20, 4), "████");
        assert_eq!(score_bar(3, 3, 3, 2), "██");
    }

    #[test]
    fn test_format_assessment_list() {
        let result = format_assessment_list(&catalog::builtin(), Lang::En, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ai-readiness"));
        assert!(lines[0].contains("(5 questions, 5-20 points)"));
        assert!(lines[1].starts_with("lead-qualification"));
    }

    #[test]
    fn test_format_assessment_list_empty() {
        assert_eq!(
            format_assessment_list(&[], Lang::En, false),
            "No assessments configured."
        );
    }

    #[test]
    fn test_format_outcome() {
        let assessment = catalog::ai_readiness();
        let outcome = Outcome {
            assessment_id: assessment.id.clone(),
            score: 20,
            tier: assessment.tiers[0].clone(),
        };
        let result = format_outcome(&outcome, &assessment, Lang::En, false);
        assert!(result.starts_with("AI Readiness Quiz"));
        assert!(result.contains("Score: 20 / 20"));
        assert!(result.contains("Tier:  Pioneer"));
        assert!(result.contains("Let's plan your next big move"));

        let arabic = format_outcome(&outcome, &assessment, Lang::Ar, false);
        assert!(arabic.contains("رائد"));
    }

    #[test]
    fn test_format_history() {
        let entry = HistoryEntry {
            completed_at: Utc::now() - Duration::hours(3),
            assessment_id: "ai-readiness".to_string(),
            score: 17,
            tier: "Ready".to_string(),
        };
        let result = format_history(&[&entry], false);
        assert!(result.contains("3h ago"));
        assert!(result.contains("ai-readiness"));
        assert!(result.contains("  17  Ready"));
    }

    #[test]
    fn test_format_history_empty() {
        assert_eq!(format_history(&[], false), "No completed assessments yet.");
    }
}
