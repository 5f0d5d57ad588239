use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CategoryFilter};
use crate::session::learned::LearnedSet;
use crate::session::quiz::QuizProgress;
use crate::session::values::{self, ParamValues, StepDirection};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Explore,
    Quiz,
    Sandbox,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Explore, Mode::Quiz, Mode::Sandbox];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Explore => "explore",
            Mode::Quiz => "quiz",
            Mode::Sandbox => "sandbox",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Mode::Explore => Mode::Quiz,
            Mode::Quiz => Mode::Sandbox,
            Mode::Sandbox => Mode::Explore,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Mode::Explore => Mode::Sandbox,
            Mode::Quiz => Mode::Explore,
            Mode::Sandbox => Mode::Quiz,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "explore" => Ok(Mode::Explore),
            "quiz" => Ok(Mode::Quiz),
            "sandbox" => Ok(Mode::Sandbox),
            other => Err(format!("unknown mode '{other}' (expected explore, quiz or sandbox)")),
        }
    }
}

/// One user interaction.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SwitchMode(Mode),
    Select(String),
    ClearSelection,
    SetFilter(CategoryFilter),
    /// Text typed into a parameter's control.
    EditRaw { id: String, raw: String },
    /// Arrow-key nudge on a parameter's control.
    Step { id: String, direction: StepDirection },
    MarkLearned(String),
    AnswerQuiz(String),
    NextQuestion,
    ToggleExamples,
}

/// Everything the view shows that can change. Lives for one run of the app.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub mode: Mode,
    pub selected: Option<String>,
    pub values: ParamValues,
    pub quiz: QuizProgress,
    pub filter: CategoryFilter,
    pub learned: LearnedSet,
    pub show_examples: bool,
}

impl SessionState {
    pub fn new(catalog: &Catalog, quiz_seed: u64) -> Self {
        Self {
            mode: Mode::Explore,
            selected: None,
            values: ParamValues::defaults(catalog),
            quiz: QuizProgress::new(quiz_seed),
            filter: CategoryFilter::All,
            learned: LearnedSet::default(),
            show_examples: true,
        }
    }

    /// Apply one action and return the resulting state. Actions naming an
    /// unknown parameter or category leave the state as it was.
    pub fn apply(mut self, catalog: &Catalog, action: Action) -> Self {
        match action {
            Action::SwitchMode(mode) => {
                self.mode = mode;
            }
            Action::Select(id) => {
                if catalog.get(&id).is_some() {
                    self.selected = Some(id);
                } else {
                    tracing::debug!(%id, "select ignored: unknown parameter");
                }
            }
            Action::ClearSelection => {
                self.selected = None;
            }
            Action::SetFilter(filter) => {
                let known = match &filter {
                    CategoryFilter::All => true,
                    CategoryFilter::Category(key) => catalog.category(key).is_some(),
                };
                if known {
                    self.filter = filter;
                } else {
                    tracing::debug!(?filter, "filter ignored: unknown category");
                }
            }
            Action::EditRaw { id, raw } => match catalog.get(&id) {
                Some(param) => {
                    let value = values::parse_input(&param.control, &raw);
                    self.values.set(&id, value);
                }
                None => tracing::debug!(%id, "edit ignored: unknown parameter"),
            },
            Action::Step { id, direction } => match (catalog.get(&id), self.values.get(&id)) {
                (Some(param), Some(current)) => {
                    let value = values::step_value(&param.control, current, direction);
                    self.values.set(&id, value);
                }
                _ => tracing::debug!(%id, "step ignored: unknown parameter"),
            },
            Action::MarkLearned(id) => {
                if catalog.get(&id).is_some() {
                    self.learned.mark(&id);
                } else {
                    tracing::debug!(%id, "mark ignored: unknown parameter");
                }
            }
            Action::AnswerQuiz(id) => {
                if !self.quiz.answer(catalog, &id) {
                    tracing::debug!(%id, "answer ignored: question already answered");
                }
            }
            Action::NextQuestion => {
                if !self.quiz.advance(catalog.questions.len()) {
                    tracing::debug!(
                        index = self.quiz.index,
                        "next ignored: question not answered"
                    );
                }
            }
            Action::ToggleExamples => {
                self.show_examples = !self.show_examples;
            }
        }
        self
    }

    pub fn progress(&self, catalog: &Catalog) -> f64 {
        self.learned.progress(catalog.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::values::ParamValue;

    fn setup() -> (Catalog, SessionState) {
        let catalog = Catalog::builtin().unwrap();
        let state = SessionState::new(&catalog, 1);
        (catalog, state)
    }

    #[test]
    fn test_initial_values_are_defaults() {
        let (catalog, state) = setup();
        for param in &catalog.parameters {
            assert_eq!(
                state.values.get(&param.id),
                Some(&ParamValue::default_for(param)),
                "{}",
                param.id
            );
        }
        assert_eq!(state.mode, Mode::Explore);
        assert!(state.selected.is_none());
        assert!(state.learned.is_empty());
    }

    #[test]
    fn test_edit_touches_only_target() {
        let (catalog, state) = setup();
        let before = state.clone();
        let after = state.apply(
            &catalog,
            Action::EditRaw {
                id: "temperature".into(),
                raw: "0.7".into(),
            },
        );
        assert_eq!(after.values.get("temperature"), Some(&ParamValue::Number(0.7)));
        for (id, value) in before.values.iter() {
            if id != "temperature" {
                assert_eq!(after.values.get(id), Some(value), "{id}");
            }
        }
    }

    #[test]
    fn test_number_garbage_resets_to_min() {
        let (catalog, state) = setup();
        let state = state.apply(
            &catalog,
            Action::EditRaw {
                id: "max_retries".into(),
                raw: "lots".into(),
            },
        );
        assert_eq!(state.values.get("max_retries"), Some(&ParamValue::Number(0.0)));
    }

    #[test]
    fn test_unknown_parameter_is_ignored() {
        let (catalog, state) = setup();
        let before = state.clone();
        let after = state
            .apply(
                &catalog,
                Action::EditRaw {
                    id: "top_k".into(),
                    raw: "5".into(),
                },
            )
            .apply(&catalog, Action::Select("top_k".into()))
            .apply(&catalog, Action::MarkLearned("top_k".into()));
        assert_eq!(after, before);
    }

    #[test]
    fn test_filter_rejects_unknown_category() {
        let (catalog, state) = setup();
        let state = state.apply(
            &catalog,
            Action::SetFilter(CategoryFilter::Category("network".into())),
        );
        let state = state.apply(
            &catalog,
            Action::SetFilter(CategoryFilter::Category("bogus".into())),
        );
        assert_eq!(state.filter, CategoryFilter::Category("network".into()));
    }

    #[test]
    fn test_select_and_clear() {
        let (catalog, state) = setup();
        let state = state.apply(&catalog, Action::Select("timeout".into()));
        assert_eq!(state.selected.as_deref(), Some("timeout"));
        let state = state.apply(&catalog, Action::ClearSelection);
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_mark_learned_updates_progress() {
        let (catalog, state) = setup();
        let state = state
            .apply(&catalog, Action::MarkLearned("top_p".into()))
            .apply(&catalog, Action::MarkLearned("top_p".into()));
        assert_eq!(state.learned.len(), 1);
        assert!((state.progress(&catalog) - 1.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_step_select_cycles() {
        let (catalog, state) = setup();
        let state = state.apply(
            &catalog,
            Action::Step {
                id: "reasoning_effort".into(),
                direction: StepDirection::Up,
            },
        );
        assert_eq!(
            state.values.get("reasoning_effort"),
            Some(&ParamValue::Text("high".into()))
        );
    }

    #[test]
    fn test_next_question_waits_for_answer() {
        let (catalog, state) = setup();
        let state = state.apply(&catalog, Action::NextQuestion);
        assert_eq!(state.quiz.index, 0);
        assert!(!state.quiz.answered);

        let state = state
            .apply(&catalog, Action::AnswerQuiz("top_p".into()))
            .apply(&catalog, Action::NextQuestion);
        assert_eq!(state.quiz.index, 1);
    }

    #[test]
    fn test_toggle_examples() {
        let (catalog, state) = setup();
        assert!(state.show_examples);
        let state = state.apply(&catalog, Action::ToggleExamples);
        assert!(!state.show_examples);
    }

    #[test]
    fn test_mode_parse_and_cycle() {
        assert_eq!("Quiz".parse::<Mode>().unwrap(), Mode::Quiz);
        assert!("settings".parse::<Mode>().is_err());
        for mode in Mode::ALL {
            assert_eq!(mode.next().prev(), mode);
        }
    }
}
