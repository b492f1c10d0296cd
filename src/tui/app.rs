use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::assessment::{Lang, Outcome, Question, Quiz, SessionState};
use crate::config::FollowUpConfig;
use crate::follow_up;
use crate::history;
use crate::tui::theme::ThemeColors;

const FLASH_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Picker,
    Question,
    Result,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

pub struct App {
    pub quizzes: Vec<Quiz>,
    pub picker_state: ListState,
    pub option_state: ListState,
    pub active: Option<usize>,
    pub session: Option<SessionState>,
    /// Option index picked at each answered step; weights alone can repeat
    pub choices: BTreeMap<usize, usize>,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub lang: Lang,
    pub theme: ThemeColors,
    pub follow_up: Option<FollowUpConfig>,
    pub history_path: Option<PathBuf>,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        quizzes: Vec<Quiz>,
        lang: Lang,
        theme: ThemeColors,
        follow_up: Option<FollowUpConfig>,
        history_path: Option<PathBuf>,
    ) -> Self {
        let mut picker_state = ListState::default();
        if !quizzes.is_empty() {
            picker_state.select(Some(0));
        }

        Self {
            quizzes,
            picker_state,
            option_state: ListState::default(),
            active: None,
            session: None,
            choices: BTreeMap::new(),
            screen: Screen::Picker,
            input_mode: InputMode::Normal,
            lang,
            theme,
            follow_up,
            history_path,
            flash_message: None,
            should_quit: false,
        }
    }

    /// Skip the picker and start the quiz with `id` right away
    pub fn start_by_id(&mut self, id: &str) -> bool {
        match self.quizzes.iter().position(|q| q.assessment().id == id) {
            Some(idx) => {
                self.picker_state.select(Some(idx));
                self.start_quiz(idx);
                true
            }
            None => false,
        }
    }

    pub fn start_selected(&mut self) {
        if let Some(idx) = self.picker_state.selected() {
            self.start_quiz(idx);
        }
    }

    fn start_quiz(&mut self, idx: usize) {
        let Some(quiz) = self.quizzes.get(idx) else {
            return;
        };
        tracing::debug!(assessment = %quiz.assessment().id, "starting assessment");
        self.session = Some(quiz.start());
        self.choices.clear();
        self.active = Some(idx);
        self.screen = Screen::Question;
        self.option_state.select(Some(0));
    }

    pub fn active_quiz(&self) -> Option<&Quiz> {
        self.active.and_then(|idx| self.quizzes.get(idx))
    }

    pub fn current_question(&self) -> Option<&Question> {
        let quiz = self.active_quiz()?;
        let session = self.session.as_ref()?;
        quiz.assessment().questions.get(session.step())
    }

    pub fn outcome(&self) -> Option<Outcome> {
        let quiz = self.active_quiz()?;
        match quiz.outcome(self.session.as_ref()?) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(assessment = %quiz.assessment().id, "cannot score run: {:#}", e);
                None
            }
        }
    }

    /// Index of the option previously chosen for the current step, if any
    pub fn previous_choice(&self) -> Option<usize> {
        let session = self.session.as_ref()?;
        session
            .response_at(session.step())
            .and(self.choices.get(&session.step()).copied())
    }

    pub fn next_item(&mut self) {
        match self.screen {
            Screen::Picker => step_list(&mut self.picker_state, self.quizzes.len(), 1),
            Screen::Question => {
                let len = self.current_question().map_or(0, |q| q.options.len());
                step_list(&mut self.option_state, len, 1);
            }
            Screen::Result => {}
        }
    }

    pub fn previous_item(&mut self) {
        match self.screen {
            Screen::Picker => step_list(&mut self.picker_state, self.quizzes.len(), -1),
            Screen::Question => {
                let len = self.current_question().map_or(0, |q| q.options.len());
                step_list(&mut self.option_state, len, -1);
            }
            Screen::Result => {}
        }
    }

    pub fn confirm_selected_option(&mut self) {
        if let Some(idx) = self.option_state.selected() {
            self.choose_option(idx);
        }
    }

    /// Answer the current question with option `idx` (0-based)
    pub fn choose_option(&mut self, idx: usize) {
        let weight = match self.current_question().and_then(|q| q.options.get(idx)) {
            Some(option) => option.weight,
            None => return,
        };
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.is_completed() {
            return;
        }

        self.choices.insert(session.step(), idx);
        let next = session.answer(weight);
        self.session = Some(next);

        if self.session.as_ref().is_some_and(SessionState::is_completed) {
            self.screen = Screen::Result;
            self.record_outcome();
        } else {
            let preselect = self.previous_choice().unwrap_or(0);
            self.option_state.select(Some(preselect));
        }
    }

    pub fn go_back(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.step() == 0 {
            self.show_flash("Already at the first question".to_string());
            return;
        }
        let previous = session.go_back();
        let step = previous.step();
        self.choices.retain(|&k, _| k <= step);
        self.session = Some(previous);
        let preselect = self.previous_choice().unwrap_or(0);
        self.option_state.select(Some(preselect));
    }

    pub fn restart(&mut self) {
        let Some(quiz) = self.active_quiz() else {
            return;
        };
        self.session = Some(quiz.reset());
        self.choices.clear();
        self.screen = Screen::Question;
        self.option_state.select(Some(0));
        self.show_flash("Restarted".to_string());
    }

    pub fn back_to_picker(&mut self) {
        self.session = None;
        self.choices.clear();
        self.active = None;
        self.screen = Screen::Picker;
    }

    pub fn toggle_language(&mut self) {
        self.lang = self.lang.toggle();
    }

    fn record_outcome(&mut self) {
        let Some(outcome) = self.outcome() else {
            return;
        };
        tracing::debug!(
            assessment = %outcome.assessment_id,
            score = outcome.score,
            tier = %outcome.tier.name.en,
            "assessment completed"
        );

        let Some(path) = self.history_path.clone() else {
            return;
        };
        let result = history::load_history(&path).and_then(|mut state| {
            state.record(&outcome);
            history::save_history(&path, &state)
        });
        if let Err(e) = result {
            self.show_flash(format!("Failed to save history: {}", e));
        }
    }

    /// Link for the follow-up action of the finished run
    pub fn follow_up_link(&self) -> Option<String> {
        let config = self.follow_up.as_ref()?;
        let outcome = self.outcome()?;
        let quiz = self.active_quiz()?;
        Some(follow_up::build_link(
            config,
            &outcome,
            &quiz.assessment().title,
            self.lang,
        ))
    }

    pub fn open_follow_up(&mut self) {
        match self.follow_up_link() {
            Some(link) => match follow_up::open_url(&link) {
                Ok(()) => self.show_flash("Opened follow-up link".to_string()),
                Err(e) => self.show_flash(format!("Failed to open link: {}", e)),
            },
            None => self.show_flash("No follow-up link configured".to_string()),
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed() >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }
}

/// Move a list selection by `delta`, wrapping at both ends
fn step_list(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(len as isize) as usize;
    state.select(Some(next));
}
