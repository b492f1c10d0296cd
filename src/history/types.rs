use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::Outcome;

/// Oldest entries are dropped beyond this many.
pub const MAX_ENTRIES: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

/// A completed run as recorded by the terminal app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub completed_at: DateTime<Utc>,
    pub assessment_id: String,
    pub score: i64,
    /// English tier name at the time of completion
    pub tier: String,
}

impl HistoryEntry {
    /// Format how long ago the run completed, e.g. "3h ago"
    pub fn format_ago(&self) -> String {
        let elapsed = Utc::now() - self.completed_at;
        let secs = elapsed.num_seconds();
        if secs < 60 {
            return "just now".to_string();
        }
        // Round to the largest unit so humantime prints a single component
        let rounded = if secs >= 86_400 {
            secs - secs % 86_400
        } else if secs >= 3_600 {
            secs - secs % 3_600
        } else {
            secs - secs % 60
        };
        format!(
            "{} ago",
            humantime::format_duration(std::time::Duration::from_secs(rounded as u64))
        )
    }
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryState {
    /// Create a new empty history with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            entries: Vec::new(),
        }
    }

    /// Append an outcome stamped with the current time
    pub fn record(&mut self, outcome: &Outcome) {
        self.record_at(outcome, Utc::now());
    }

    pub fn record_at(&mut self, outcome: &Outcome, completed_at: DateTime<Utc>) {
        self.entries.push(HistoryEntry {
            completed_at,
            assessment_id: outcome.assessment_id.clone(),
            score: outcome.score,
            tier: outcome.tier.name.en.clone(),
        });
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    /// Entries newest first, optionally limited to one assessment
    pub fn recent(&self, assessment_id: Option<&str>) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| assessment_id.is_none_or(|id| e.assessment_id == id))
            .collect();
        entries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{Text, Tier};
    use chrono::Duration;

    fn outcome(id: &str, score: i64) -> Outcome {
        Outcome {
            assessment_id: id.to_string(),
            score,
            tier: Tier {
                name: Text::bilingual("Ready", "جاهز"),
                threshold: 15,
                message: None,
            },
        }
    }

    #[test]
    fn test_new_state_empty() {
        let state = HistoryState::new();
        assert_eq!(state.version, 1);
        assert!(state.is_empty());
    }

    #[test]
    fn test_record_stores_english_tier() {
        let mut state = HistoryState::new();
        state.record(&outcome("ai-readiness", 17));
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.entries[0].tier, "Ready");
        assert_eq!(state.entries[0].score, 17);
    }

    #[test]
    fn test_record_caps_entries() {
        let mut state = HistoryState::new();
        for i in 0..(MAX_ENTRIES as i64 + 5) {
            state.record(&outcome("ai-readiness", i));
        }
        assert_eq!(state.entries.len(), MAX_ENTRIES);
        assert_eq!(state.entries[0].score, 5);
    }

    #[test]
    fn test_recent_newest_first_and_filtered() {
        let mut state = HistoryState::new();
        let now = Utc::now();
        state.record_at(&outcome("a", 1), now - Duration::hours(2));
        state.record_at(&outcome("b", 2), now - Duration::hours(1));
        state.record_at(&outcome("a", 3), now);

        let all: Vec<i64> = state.recent(None).iter().map(|e| e.score).collect();
        assert_eq!(all, vec![3, 2, 1]);

        let only_a: Vec<i64> = state.recent(Some("a")).iter().map(|e| e.score).collect();
        assert_eq!(only_a, vec![3, 1]);
    }

    #[test]
    fn test_clear() {
        let mut state = HistoryState::new();
        state.record(&outcome("a", 1));
        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_format_ago() {
        let entry = |ago: Duration| HistoryEntry {
            completed_at: Utc::now() - ago,
            assessment_id: "a".to_string(),
            score: 1,
            tier: "Ready".to_string(),
        };
        assert_eq!(entry(Duration::seconds(5)).format_ago(), "just now");
        assert_eq!(entry(Duration::minutes(5) + Duration::seconds(10)).format_ago(), "5m ago");
        assert_eq!(entry(Duration::hours(3) + Duration::minutes(20)).format_ago(), "3h ago");
        assert_eq!(entry(Duration::days(2) + Duration::hours(4)).format_ago(), "2days ago");
    }
}
