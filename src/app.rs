use paramlab::catalog::{Catalog, CategoryFilter, ParameterDescriptor};
use paramlab::config::Config;
use paramlab::session::preview::SANDBOX_PARAMS;
use paramlab::session::values::StepDirection;
use paramlab::session::{Action, Mode, SessionState};

use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

/// A parameter value being typed in.
pub struct EditField {
    pub id: String,
    pub input: LineInput,
}

pub struct App {
    pub catalog: Catalog,
    pub session: SessionState,
    pub config: Config,
    pub theme: &'static Theme,
    /// Card under the cursor in the explore list (index into the filtered list).
    pub explore_cursor: usize,
    pub quiz_cursor: usize,
    pub sandbox_cursor: usize,
    pub editing: Option<EditField>,
    pub should_quit: bool,
    config_dirty: bool,
}

impl App {
    pub fn new(catalog: Catalog, config: Config, quiz_seed: u64) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let mut session = SessionState::new(&catalog, quiz_seed);
        session = session.apply(&catalog, Action::SwitchMode(config.start_mode));
        if !config.show_examples {
            session = session.apply(&catalog, Action::ToggleExamples);
        }
        tracing::info!(seed = quiz_seed, mode = %config.start_mode, "session started");

        Self {
            catalog,
            session,
            config,
            theme,
            explore_cursor: 0,
            quiz_cursor: 0,
            sandbox_cursor: 0,
            editing: None,
            should_quit: false,
            config_dirty: false,
        }
    }

    /// Run one action through the session reducer.
    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatch");
        let previous_question = self.session.quiz.index;
        let next = self.session.clone().apply(&self.catalog, action);
        self.session = next;

        if self.session.quiz.index != previous_question {
            self.quiz_cursor = 0;
        }
        let visible = self.visible_params().len();
        self.explore_cursor = self.explore_cursor.min(visible.saturating_sub(1));
    }

    pub fn visible_params(&self) -> Vec<&ParameterDescriptor> {
        self.catalog.filtered(&self.session.filter)
    }

    pub fn sandbox_params(&self) -> Vec<&ParameterDescriptor> {
        SANDBOX_PARAMS
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    pub fn quiz_options(&self) -> Vec<&ParameterDescriptor> {
        self.session.quiz.options(&self.catalog)
    }

    /// Parameter the arrow keys and edits apply to in the current mode.
    pub fn focused_param_id(&self) -> Option<String> {
        match self.session.mode {
            Mode::Explore => self
                .visible_params()
                .get(self.explore_cursor)
                .map(|p| p.id.clone()),
            Mode::Sandbox => self
                .sandbox_params()
                .get(self.sandbox_cursor)
                .map(|p| p.id.clone()),
            Mode::Quiz => None,
        }
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.editing = None;
        self.dispatch(Action::SwitchMode(mode));
    }

    pub fn cursor_down(&mut self) {
        match self.session.mode {
            Mode::Explore => {
                let len = self.visible_params().len();
                if self.explore_cursor + 1 < len {
                    self.explore_cursor += 1;
                }
            }
            Mode::Quiz => {
                let len = self.quiz_options().len();
                if self.quiz_cursor + 1 < len {
                    self.quiz_cursor += 1;
                }
            }
            Mode::Sandbox => {
                if self.sandbox_cursor + 1 < self.sandbox_params().len() {
                    self.sandbox_cursor += 1;
                }
            }
        }
    }

    pub fn cursor_up(&mut self) {
        match self.session.mode {
            Mode::Explore => self.explore_cursor = self.explore_cursor.saturating_sub(1),
            Mode::Quiz => self.quiz_cursor = self.quiz_cursor.saturating_sub(1),
            Mode::Sandbox => self.sandbox_cursor = self.sandbox_cursor.saturating_sub(1),
        }
    }

    pub fn step_focused(&mut self, direction: StepDirection) {
        if let Some(id) = self.focused_param_id() {
            self.dispatch(Action::Step { id, direction });
        }
    }

    /// Move the category filter one chip left or right, wrapping through "All".
    pub fn cycle_filter(&mut self, forward: bool) {
        let mut filters = vec![CategoryFilter::All];
        filters.extend(
            self.catalog
                .categories
                .iter()
                .map(|c| CategoryFilter::Category(c.key.clone())),
        );
        let idx = filters
            .iter()
            .position(|f| *f == self.session.filter)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % filters.len()
        } else if idx == 0 {
            filters.len() - 1
        } else {
            idx - 1
        };
        self.explore_cursor = 0;
        self.dispatch(Action::SetFilter(filters.swap_remove(next)));
    }

    pub fn open_detail(&mut self) {
        if let Some(id) = self.focused_param_id() {
            self.dispatch(Action::Select(id));
        }
    }

    pub fn mark_focused_learned(&mut self) {
        if let Some(id) = self.focused_param_id() {
            self.dispatch(Action::MarkLearned(id));
        }
    }

    pub fn begin_edit(&mut self) {
        let Some(id) = self.focused_param_id() else {
            return;
        };
        let current = self
            .session
            .values
            .get(&id)
            .map(|v| v.to_string())
            .unwrap_or_default();
        self.editing = Some(EditField {
            id,
            input: LineInput::new(&current),
        });
    }

    pub fn handle_edit_key(&mut self, key: crossterm::event::KeyEvent) {
        let Some(field) = self.editing.as_mut() else {
            return;
        };
        match field.input.handle(key) {
            InputResult::Continue => {}
            InputResult::Cancel => self.editing = None,
            InputResult::Submit => {
                if let Some(field) = self.editing.take() {
                    self.dispatch(Action::EditRaw {
                        id: field.id,
                        raw: field.input.value().to_string(),
                    });
                }
            }
        }
    }

    /// Answer with the option at `index`, or the cursor when `None`.
    pub fn answer_quiz(&mut self, index: Option<usize>) {
        let index = index.unwrap_or(self.quiz_cursor);
        let choice = self.quiz_options().get(index).map(|p| p.id.clone());
        if let Some(id) = choice {
            self.quiz_cursor = index;
            self.dispatch(Action::AnswerQuiz(id));
        }
    }

    pub fn next_question(&mut self) {
        self.dispatch(Action::NextQuestion);
    }

    pub fn cycle_theme(&mut self) {
        let themes = Theme::available_themes();
        if themes.is_empty() {
            return;
        }
        let idx = themes.iter().position(|t| *t == self.config.theme);
        let next = idx.map(|i| (i + 1) % themes.len()).unwrap_or(0);
        self.config.theme = themes[next].clone();
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            self.theme = Box::leak(Box::new(new_theme));
            self.config_dirty = true;
        }
    }

    /// Persist the config if the theme was changed during the run.
    pub fn save_config(&self) {
        if !self.config_dirty {
            return;
        }
        let path = Config::config_path();
        match self.config.save_to(&path) {
            Ok(()) => tracing::info!(path = %path.display(), "config saved"),
            Err(e) => tracing::warn!("failed to save config: {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use paramlab::session::values::ParamValue;

    fn app() -> App {
        App::new(Catalog::builtin().unwrap(), Config::default(), 5)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_edit_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_start_mode_from_config() {
        let config = Config {
            start_mode: Mode::Sandbox,
            show_examples: false,
            ..Config::default()
        };
        let app = App::new(Catalog::builtin().unwrap(), config, 1);
        assert_eq!(app.session.mode, Mode::Sandbox);
        assert!(!app.session.show_examples);
    }

    #[test]
    fn test_edit_submit_updates_value() {
        let mut app = app();
        app.explore_cursor = 1; // top_p
        app.begin_edit();
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Char('.'));
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Enter);
        assert!(app.editing.is_none());
        assert_eq!(app.session.values.get("top_p"), Some(&ParamValue::Number(0.5)));
    }

    #[test]
    fn test_edit_cancel_keeps_value() {
        let mut app = app();
        app.begin_edit();
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Esc);
        assert!(app.editing.is_none());
        assert_eq!(
            app.session.values.get("temperature"),
            Some(&ParamValue::Number(1.0))
        );
    }

    #[test]
    fn test_filter_cycle_wraps_and_resets_cursor() {
        let mut app = app();
        app.explore_cursor = 5;
        app.cycle_filter(false);
        assert_eq!(app.session.filter, CategoryFilter::Category("tracking".into()));
        assert_eq!(app.explore_cursor, 0);
        app.cycle_filter(true);
        assert_eq!(app.session.filter, CategoryFilter::All);
    }

    #[test]
    fn test_cursor_stays_in_filtered_list() {
        let mut app = app();
        app.cycle_filter(true); // generation: 3 params
        for _ in 0..10 {
            app.cursor_down();
        }
        assert_eq!(app.explore_cursor, 2);
        assert_eq!(app.focused_param_id().as_deref(), Some("presence_penalty"));
    }

    #[test]
    fn test_sandbox_focus_walks_fixed_params() {
        let mut app = app();
        app.switch_mode(Mode::Sandbox);
        app.cursor_down();
        app.cursor_down();
        app.cursor_down();
        app.cursor_down();
        assert_eq!(app.focused_param_id().as_deref(), Some("max_tokens"));
        app.step_focused(StepDirection::Up);
        assert_eq!(
            app.session.values.get("max_tokens"),
            Some(&ParamValue::Number(4196.0))
        );
    }

    #[test]
    fn test_quiz_answer_and_next_resets_cursor() {
        let mut app = app();
        app.switch_mode(Mode::Quiz);
        let correct = app
            .quiz_options()
            .iter()
            .position(|p| p.id == "temperature")
            .unwrap();
        app.answer_quiz(Some(correct));
        assert_eq!(app.session.quiz.score, 1);
        app.next_question();
        assert_eq!(app.session.quiz.index, 1);
        assert_eq!(app.quiz_cursor, 0);
    }

    #[test]
    fn test_mark_learned_and_open_detail() {
        let mut app = app();
        app.mark_focused_learned();
        app.open_detail();
        assert!(app.session.learned.contains("temperature"));
        assert_eq!(app.session.selected.as_deref(), Some("temperature"));
    }
}
