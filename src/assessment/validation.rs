use std::collections::HashSet;

use super::model::Assessment;

/// Validate an assessment before any run starts.
/// Returns all validation errors at once (not just the first).
pub fn validate_assessment(assessment: &Assessment) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if assessment.id.trim().is_empty() {
        errors.push("id: must not be empty".to_string());
    } else if assessment.id.chars().any(char::is_whitespace) {
        errors.push(format!("id: '{}' must not contain whitespace", assessment.id));
    }

    if assessment.title.is_blank() {
        errors.push("title.en: must not be empty".to_string());
    }

    if assessment.questions.is_empty() {
        errors.push("questions: must contain at least one question".to_string());
    }

    for (i, question) in assessment.questions.iter().enumerate() {
        if question.prompt.is_blank() {
            errors.push(format!("questions[{}].prompt.en: must not be empty", i));
        }
        if question.options.is_empty() {
            errors.push(format!(
                "questions[{}].options: must contain at least one option",
                i
            ));
        }
        for (j, option) in question.options.iter().enumerate() {
            if option.label.is_blank() {
                errors.push(format!(
                    "questions[{}].options[{}].label.en: must not be empty",
                    i, j
                ));
            }
        }
    }

    let min_score = assessment.checked_min_score();
    if min_score.is_none() || assessment.checked_max_score().is_none() {
        errors.push("questions: total weight range overflows i64".to_string());
    }

    if assessment.tiers.is_empty() {
        errors.push("tiers: must contain at least one tier".to_string());
    } else {
        let mut seen = HashSet::new();
        for (i, tier) in assessment.tiers.iter().enumerate() {
            if tier.name.is_blank() {
                errors.push(format!("tiers[{}].name.en: must not be empty", i));
            }
            if !seen.insert(tier.threshold) {
                errors.push(format!(
                    "tiers[{}].threshold: {} is used by more than one tier",
                    i, tier.threshold
                ));
            }
        }

        // Weights may be negative, so the catch-all has to reach the lowest total
        let lowest = assessment.tiers.iter().map(|t| t.threshold).min();
        if let (Some(lowest), Some(min_score)) = (lowest, min_score) {
            let floor = min_score.min(0);
            if lowest > floor {
                errors.push(format!(
                    "tiers: no catch-all tier; lowest threshold is {} but scores can be as low as {}",
                    lowest, floor
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
