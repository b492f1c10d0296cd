use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::model::{checked_total, Assessment, Tier};
use super::validation::validate_assessment;

/// Snapshot of one in-progress or completed run.
///
/// Transitions never mutate in place; each returns the next snapshot so the caller
/// owns the single mutable reference and can re-render on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    step: usize,
    total: usize,
    responses: BTreeMap<usize, i64>,
    completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub step_display: usize, // 1-based
    pub total: usize,
    pub percent: f64,
}

impl SessionState {
    /// Begin a run at step 0 with no answers.
    pub fn start(assessment: &Assessment) -> Self {
        Self {
            step: 0,
            total: assessment.len(),
            responses: BTreeMap::new(),
            completed: false,
        }
    }

    /// Discard everything and begin again.
    pub fn reset(assessment: &Assessment) -> Self {
        Self::start(assessment)
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn responses(&self) -> &BTreeMap<usize, i64> {
        &self.responses
    }

    /// Weight recorded for `step`, if any (kept after navigating back to it).
    pub fn response_at(&self, step: usize) -> Option<i64> {
        self.responses.get(&step).copied()
    }

    /// Record `weight` for the current question and move on.
    ///
    /// Answering the last question completes the run and parks the step at `total`.
    /// Once completed this is a no-op.
    pub fn answer(&self, weight: i64) -> Self {
        if self.completed || self.step >= self.total {
            return self.clone();
        }

        let mut next = self.clone();
        next.responses.insert(self.step, weight);
        if self.step + 1 < self.total {
            next.step += 1;
        } else {
            next.step = self.total;
            next.completed = true;
        }
        next
    }

    /// Return to the previous question. No-op at step 0 or after completion.
    ///
    /// The answer for the step returned to stays recorded until it is answered again;
    /// answers past it are dropped.
    pub fn go_back(&self) -> Self {
        if self.completed || self.step == 0 {
            return self.clone();
        }

        let mut next = self.clone();
        next.step -= 1;
        let step = next.step;
        next.responses.retain(|&k, _| k <= step);
        next
    }

    pub fn progress(&self) -> Progress {
        let step_display = (self.step + 1).min(self.total);
        let percent = if self.total > 0 {
            step_display as f64 / self.total as f64 * 100.0
        } else {
            0.0
        };
        Progress {
            step_display,
            total: self.total,
            percent,
        }
    }

    /// Sum of the recorded weights so far, or `None` if it overflows `i64`.
    ///
    /// A validated assessment bounds every prefix sum, so this only fails for
    /// weights fed in without a [`Quiz`].
    pub fn running_total(&self) -> Option<i64> {
        checked_total(self.responses.values().copied())
    }

    /// Final score, available only once the run is complete.
    pub fn score(&self) -> Option<i64> {
        if self.completed {
            self.running_total()
        } else {
            None
        }
    }
}

/// Pick the highest-threshold tier whose threshold is at or below `score`.
pub fn classify(score: i64, tiers: &[Tier]) -> Result<&Tier> {
    let mut ordered: Vec<&Tier> = tiers.iter().collect();
    ordered.sort_by(|a, b| b.threshold.cmp(&a.threshold));

    match ordered.into_iter().find(|t| t.threshold <= score) {
        Some(tier) => Ok(tier),
        None => bail!(
            "no tier covers score {}: add a catch-all tier with a threshold at or below it",
            score
        ),
    }
}

/// Result handed to the embedding layer when a run completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub assessment_id: String,
    pub score: i64,
    pub tier: Tier,
}

/// A validated assessment. Construction fails on any configuration error, so a run
/// can never reach a score that no tier covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    assessment: Assessment,
}

impl Quiz {
    pub fn new(assessment: Assessment) -> Result<Self> {
        if let Err(errors) = validate_assessment(&assessment) {
            bail!(
                "invalid assessment '{}':\n  - {}",
                assessment.id,
                errors.join("\n  - ")
            );
        }
        Ok(Self { assessment })
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn start(&self) -> SessionState {
        SessionState::start(&self.assessment)
    }

    pub fn reset(&self) -> SessionState {
        SessionState::reset(&self.assessment)
    }

    /// Score and tier of a completed run; `Ok(None)` while still in progress.
    ///
    /// Errors only when the session did not come from this quiz, since validation
    /// bounds the total and guarantees a catch-all tier.
    pub fn outcome(&self, state: &SessionState) -> Result<Option<Outcome>> {
        if !state.is_completed() {
            return Ok(None);
        }
        let Some(score) = state.running_total() else {
            bail!(
                "score for assessment '{}' overflows i64",
                self.assessment.id
            );
        };
        let tier = classify(score, &self.assessment.tiers)?;
        Ok(Some(Outcome {
            assessment_id: self.assessment.id.clone(),
            score,
            tier: tier.clone(),
        }))
    }

    /// Replay 1-based option choices through a fresh session.
    pub fn replay(&self, choices: &[usize]) -> Result<SessionState> {
        if choices.len() != self.assessment.len() {
            bail!(
                "expected {} answers, got {}",
                self.assessment.len(),
                choices.len()
            );
        }

        let mut state = self.start();
        for (i, &choice) in choices.iter().enumerate() {
            let question = &self.assessment.questions[i];
            let option = choice
                .checked_sub(1)
                .and_then(|idx| question.options.get(idx));
            match option {
                Some(option) => state = state.answer(option.weight),
                None => bail!(
                    "answer {} for question {} is out of range (1-{})",
                    choice,
                    i + 1,
                    question.options.len()
                ),
            }
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::model::{AnswerOption, Question, Text};

    fn question(weights: &[i64]) -> Question {
        Question {
            prompt: Text::new("Q"),
            options: weights
                .iter()
                .map(|&w| AnswerOption {
                    label: Text::new(w.to_string()),
                    weight: w,
                })
                .collect(),
        }
    }

    fn tier(name: &str, threshold: i64) -> Tier {
        Tier {
            name: Text::new(name),
            threshold,
            message: None,
        }
    }

    fn readiness_tiers() -> Vec<Tier> {
        vec![
            tier("Pioneer", 20),
            tier("Ready", 15),
            tier("Potential", 10),
            tier("Starter", 5),
            tier("Explorer", 0),
        ]
    }

    fn two_step() -> Assessment {
        Assessment {
            id: "two".to_string(),
            title: Text::new("Two"),
            description: None,
            questions: vec![question(&[1, 2]), question(&[3, 4])],
            tiers: vec![tier("High", 6), tier("Low", 0)],
        }
    }

    #[test]
    fn test_start_state() {
        let state = SessionState::start(&two_step());
        assert_eq!(state.step(), 0);
        assert_eq!(state.total(), 2);
        assert!(state.responses().is_empty());
        assert!(!state.is_completed());
        assert_eq!(state.score(), None);
    }

    #[test]
    fn test_answer_through_to_completion() {
        let state = SessionState::start(&two_step());

        let state = state.answer(2);
        assert_eq!(state.step(), 1);
        assert!(!state.is_completed());
        assert_eq!(state.responses(), &BTreeMap::from([(0, 2)]));

        let state = state.answer(4);
        assert!(state.is_completed());
        assert_eq!(state.step(), 2);
        assert_eq!(state.responses(), &BTreeMap::from([(0, 2), (1, 4)]));
        assert_eq!(state.score(), Some(6));
    }

    #[test]
    fn test_go_back_keeps_answer_until_overwritten() {
        let state = SessionState::start(&two_step()).answer(2);

        let state = state.go_back();
        assert_eq!(state.step(), 0);
        assert_eq!(state.responses(), &BTreeMap::from([(0, 2)]));
        assert_eq!(state.response_at(0), Some(2));

        let state = state.answer(1);
        assert_eq!(state.step(), 1);
        assert_eq!(state.responses(), &BTreeMap::from([(0, 1)]));

        let state = state.answer(3);
        assert!(state.is_completed());
        assert_eq!(state.score(), Some(4));
    }

    #[test]
    fn test_go_back_drops_answers_past_new_step() {
        let assessment = Assessment {
            questions: vec![question(&[1]), question(&[2]), question(&[3])],
            ..two_step()
        };
        let state = SessionState::start(&assessment).answer(1).answer(2);
        assert_eq!(state.step(), 2);

        let state = state.go_back().go_back();
        assert_eq!(state.step(), 0);
        assert_eq!(state.responses(), &BTreeMap::from([(0, 1)]));
        assert!(state.responses().keys().all(|&k| k <= state.step()));
    }

    #[test]
    fn test_answer_after_completion_is_noop() {
        let completed = SessionState::start(&two_step()).answer(2).answer(4);
        let again = completed.answer(4);
        assert_eq!(again, completed);
        assert_eq!(again.score(), Some(6));
    }

    #[test]
    fn test_go_back_at_start_is_noop() {
        let fresh = SessionState::start(&two_step());
        assert_eq!(fresh.go_back(), fresh);
    }

    #[test]
    fn test_go_back_after_completion_is_noop() {
        let completed = SessionState::start(&two_step()).answer(1).answer(3);
        assert_eq!(completed.go_back(), completed);
    }

    #[test]
    fn test_each_answer_advances_exactly_one_step() {
        let assessment = Assessment {
            questions: (0..5).map(|_| question(&[0, 1, 2])).collect(),
            ..two_step()
        };
        let mut state = SessionState::start(&assessment);
        for expected in 1..5 {
            state = state.answer(1);
            assert_eq!(state.step(), expected);
            assert!(!state.is_completed());
        }
        state = state.answer(1);
        assert!(state.is_completed());
    }

    #[test]
    fn test_single_question_completes_immediately() {
        let assessment = Assessment {
            questions: vec![question(&[7])],
            ..two_step()
        };
        let state = SessionState::start(&assessment).answer(7);
        assert!(state.is_completed());
        assert_eq!(state.score(), Some(7));
    }

    #[test]
    fn test_transitions_are_deterministic() {
        let run = || {
            SessionState::start(&two_step())
                .answer(2)
                .go_back()
                .answer(1)
                .answer(4)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_reset_equals_start() {
        let assessment = two_step();
        let _played = SessionState::start(&assessment).answer(2).answer(4);
        assert_eq!(SessionState::reset(&assessment), SessionState::start(&assessment));
    }

    #[test]
    fn test_progress() {
        let assessment = Assessment {
            questions: (0..5).map(|_| question(&[1])).collect(),
            ..two_step()
        };
        let state = SessionState::start(&assessment);
        let progress = state.progress();
        assert_eq!(progress.step_display, 1);
        assert_eq!(progress.total, 5);
        assert!((progress.percent - 20.0).abs() < f64::EPSILON);

        let state = state.answer(1).answer(1);
        assert_eq!(state.progress().step_display, 3);
        assert!((state.progress().percent - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_clamped_when_completed() {
        let state = SessionState::start(&two_step()).answer(1).answer(3);
        let progress = state.progress();
        assert_eq!(progress.step_display, 2);
        assert!((progress.percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_running_total_before_completion() {
        let state = SessionState::start(&two_step()).answer(2);
        assert_eq!(state.running_total(), Some(2));
        assert_eq!(state.score(), None);
    }

    #[test]
    fn test_classify_readiness_tiers() {
        let tiers = readiness_tiers();
        assert_eq!(classify(20, &tiers).unwrap().name.en, "Pioneer");
        assert_eq!(classify(19, &tiers).unwrap().name.en, "Ready");
        assert_eq!(classify(0, &tiers).unwrap().name.en, "Explorer");
        assert_eq!(classify(4, &tiers).unwrap().name.en, "Explorer");
        assert_eq!(classify(100, &tiers).unwrap().name.en, "Pioneer");
    }

    #[test]
    fn test_classify_ignores_table_order() {
        let mut tiers = readiness_tiers();
        tiers.reverse();
        assert_eq!(classify(12, &tiers).unwrap().name.en, "Potential");
    }

    #[test]
    fn test_classify_picks_highest_qualifying_for_all_scores() {
        let tiers = readiness_tiers();
        for score in 0..30 {
            let chosen = classify(score, &tiers).unwrap();
            assert!(chosen.threshold <= score);
            assert!(tiers
                .iter()
                .filter(|t| t.threshold <= score)
                .all(|t| t.threshold <= chosen.threshold));
        }
    }

    #[test]
    fn test_classify_without_catch_all_errors() {
        let tiers = vec![tier("High", 10)];
        let result = classify(3, &tiers);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no tier covers score 3"));
    }

    #[test]
    fn test_quiz_rejects_empty_assessment() {
        let assessment = Assessment {
            questions: vec![],
            ..two_step()
        };
        let err = Quiz::new(assessment).unwrap_err();
        assert!(err.to_string().contains("questions"));
    }

    #[test]
    fn test_quiz_rejects_missing_catch_all() {
        let assessment = Assessment {
            tiers: vec![tier("High", 5)],
            ..two_step()
        };
        assert!(Quiz::new(assessment).is_err());
    }

    #[test]
    fn test_quiz_outcome() {
        let quiz = Quiz::new(two_step()).unwrap();
        let state = quiz.start().answer(2);
        assert!(quiz.outcome(&state).unwrap().is_none());

        let state = state.answer(4);
        let outcome = quiz.outcome(&state).unwrap().unwrap();
        assert_eq!(outcome.assessment_id, "two");
        assert_eq!(outcome.score, 6);
        assert_eq!(outcome.tier.name.en, "High");
    }

    #[test]
    fn test_quiz_replay() {
        let quiz = Quiz::new(two_step()).unwrap();
        let state = quiz.replay(&[1, 2]).unwrap();
        assert_eq!(state.score(), Some(5));
        assert_eq!(quiz.outcome(&state).unwrap().unwrap().tier.name.en, "Low");
    }

    #[test]
    fn test_running_total_overflow() {
        let state = SessionState::start(&two_step())
            .answer(i64::MAX)
            .answer(1);
        assert!(state.is_completed());
        assert_eq!(state.running_total(), None);
        assert_eq!(state.score(), None);
    }

    #[test]
    fn test_outcome_reports_unclassifiable_score() {
        let quiz = Quiz::new(two_step()).unwrap();
        // Weights from outside the quiz can land below every tier
        let state = quiz.start().answer(-50).answer(-50);
        let err = quiz.outcome(&state).unwrap_err();
        assert!(err.to_string().contains("no tier covers score -100"));

        let state = quiz.start().answer(i64::MAX).answer(1);
        let err = quiz.outcome(&state).unwrap_err();
        assert!(err.to_string().contains("overflows i64"));
    }

    #[test]
    fn test_quiz_replay_rejects_bad_input() {
        let quiz = Quiz::new(two_step()).unwrap();
        assert!(quiz.replay(&[1]).is_err());
        assert!(quiz.replay(&[0, 1]).is_err());
        let err = quiz.replay(&[1, 3]).unwrap_err();
        assert!(err.to_string().contains("question 2"));
    }

    #[test]
    fn test_session_state_serde_roundtrip() {
        let state = SessionState::start(&two_step()).answer(2);
        let json = serde_json::to_string(&state).unwrap();
        let parsed: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
