use serde::{Deserialize, Serialize};

/// Display language for assessment text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ar,
}

impl Lang {
    pub fn toggle(self) -> Self {
        match self {
            Lang::En => Lang::Ar,
            Lang::Ar => Lang::En,
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Lang::Ar)
    }
}

/// Localized text. English is required; Arabic falls back to English when missing.
///
/// Example YAML:
/// ```yaml
/// prompt:
///   en: "How mature is your data?"
///   ar: "ما مدى نضج بياناتك؟"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Text {
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
}

impl Text {
    pub fn new(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: None,
        }
    }

    pub fn bilingual(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: Some(ar.into()),
        }
    }

    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => &self.en,
            Lang::Ar => self.ar.as_deref().unwrap_or(&self.en),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.en.trim().is_empty()
    }
}

/// A selectable answer carrying an integer weight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerOption {
    pub label: Text,
    pub weight: i64,
}

/// A multiple-choice question. Its position in `Assessment::questions` is its step index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub prompt: Text,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn min_weight(&self) -> Option<i64> {
        self.options.iter().map(|o| o.weight).min()
    }

    pub fn max_weight(&self) -> Option<i64> {
        self.options.iter().map(|o| o.weight).max()
    }
}

/// A named score bracket. Selected when it has the highest threshold not above the score.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Tier {
    pub name: Text,
    pub threshold: i64,
    /// Message shown with the result and passed to the follow-up link as `{message}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Text>,
}

/// An ordered, fixed list of questions plus the tiers used to classify the total.
///
/// Example YAML:
/// ```yaml
/// id: ai-readiness
/// title: { en: "AI Readiness" }
/// questions:
///   - prompt: { en: "Do you collect customer data?" }
///     options:
///       - { label: { en: "No" }, weight: 0 }
///       - { label: { en: "Yes" }, weight: 4 }
/// tiers:
///   - { name: { en: "Ready" }, threshold: 4 }
///   - { name: { en: "Explorer" }, threshold: 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Assessment {
    pub id: String,
    pub title: Text,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Text>,
    pub questions: Vec<Question>,
    pub tiers: Vec<Tier>,
}

impl Assessment {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Lowest total reachable by picking the lightest option everywhere.
    /// `None` if any running sum overflows `i64`.
    pub fn checked_min_score(&self) -> Option<i64> {
        checked_total(self.questions.iter().filter_map(Question::min_weight))
    }

    /// Highest total reachable by picking the heaviest option everywhere.
    /// `None` if any running sum overflows `i64`.
    pub fn checked_max_score(&self) -> Option<i64> {
        checked_total(self.questions.iter().filter_map(Question::max_weight))
    }

    /// Saturating form of [`Assessment::checked_min_score`] for display.
    pub fn min_score(&self) -> i64 {
        self.checked_min_score().unwrap_or(i64::MIN)
    }

    /// Saturating form of [`Assessment::checked_max_score`] for display.
    pub fn max_score(&self) -> i64 {
        self.checked_max_score().unwrap_or(i64::MAX)
    }

    /// Tiers ordered by descending threshold.
    pub fn tiers_descending(&self) -> Vec<&Tier> {
        let mut tiers: Vec<&Tier> = self.tiers.iter().collect();
        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        tiers
    }
}

/// Sum weights in order, failing on the first overflowing step.
pub(crate) fn checked_total(weights: impl IntoIterator<Item = i64>) -> Option<i64> {
    weights
        .into_iter()
        .try_fold(0i64, |acc, weight| acc.checked_add(weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(weight: i64) -> AnswerOption {
        AnswerOption {
            label: Text::new(format!("w{}", weight)),
            weight,
        }
    }

    #[test]
    fn test_text_falls_back_to_english() {
        let text = Text::new("Hello");
        assert_eq!(text.get(Lang::En), "Hello");
        assert_eq!(text.get(Lang::Ar), "Hello");

        let text = Text::bilingual("Hello", "مرحبا");
        assert_eq!(text.get(Lang::Ar), "مرحبا");
    }

    #[test]
    fn test_lang_toggle() {
        assert_eq!(Lang::En.toggle(), Lang::Ar);
        assert_eq!(Lang::Ar.toggle(), Lang::En);
        assert!(Lang::Ar.is_rtl());
        assert!(!Lang::En.is_rtl());
    }

    #[test]
    fn test_min_max_score() {
        let assessment = Assessment {
            id: "t".to_string(),
            title: Text::new("T"),
            description: None,
            questions: vec![
                Question {
                    prompt: Text::new("Q0"),
                    options: vec![option(1), option(2)],
                },
                Question {
                    prompt: Text::new("Q1"),
                    options: vec![option(-3), option(4)],
                },
            ],
            tiers: vec![],
        };
        assert_eq!(assessment.min_score(), -2);
        assert_eq!(assessment.max_score(), 6);
    }

    #[test]
    fn test_score_range_overflow() {
        let assessment = Assessment {
            id: "big".to_string(),
            title: Text::new("Big"),
            description: None,
            questions: vec![
                Question {
                    prompt: Text::new("Q0"),
                    options: vec![option(0), option(i64::MAX)],
                },
                Question {
                    prompt: Text::new("Q1"),
                    options: vec![option(0), option(i64::MAX)],
                },
            ],
            tiers: vec![],
        };
        assert_eq!(assessment.checked_min_score(), Some(0));
        assert_eq!(assessment.checked_max_score(), None);
        assert_eq!(assessment.max_score(), i64::MAX);
    }

    #[test]
    fn test_tiers_descending() {
        let assessment = Assessment {
            id: "t".to_string(),
            title: Text::new("T"),
            description: None,
            questions: vec![],
            tiers: vec![
                Tier { name: Text::new("Low"), threshold: 0, message: None },
                Tier { name: Text::new("High"), threshold: 10, message: None },
                Tier { name: Text::new("Mid"), threshold: 5, message: None },
            ],
        };
        let names: Vec<&str> = assessment
            .tiers_descending()
            .iter()
            .map(|t| t.name.en.as_str())
            .collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_parse_assessment_yaml() {
        let yaml = r#"
id: mini
title:
  en: "Mini"
  ar: "مصغر"
questions:
  - prompt: { en: "Pick one" }
    options:
      - { label: { en: "A" }, weight: 1 }
      - { label: { en: "B" }, weight: 2 }
tiers:
  - name: { en: "Top" }
    threshold: 2
    message: { en: "Nice" }
  - { name: { en: "Base" }, threshold: 0 }
"#;
        let assessment: Assessment = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(assessment.id, "mini");
        assert_eq!(assessment.title.get(Lang::Ar), "مصغر");
        assert_eq!(assessment.questions[0].options[1].weight, 2);
        assert_eq!(assessment.tiers.len(), 2);
        assert!(assessment.description.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
id: mini
title: { en: "Mini" }
questions: []
tiers: []
colour: red
"#;
        let result: Result<Assessment, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
