use std::collections::HashSet;
use std::process::Command;

use paramlab::catalog::{Catalog, CategoryFilter};
use paramlab::session::preview::sandbox_preview;
use paramlab::session::values::{ParamValue, StepDirection};
use paramlab::session::{Action, Mode, SessionState};

fn start(seed: u64) -> (Catalog, SessionState) {
    let catalog = Catalog::builtin().expect("built-in catalog loads");
    let state = SessionState::new(&catalog, seed);
    (catalog, state)
}

fn run(catalog: &Catalog, state: SessionState, actions: Vec<Action>) -> SessionState {
    actions
        .into_iter()
        .fold(state, |state, action| state.apply(catalog, action))
}

#[test]
fn perfect_quiz_round_then_wraps_with_score_reset() {
    let (catalog, state) = start(42);
    let mut state = state.apply(&catalog, Action::SwitchMode(Mode::Quiz));
    let total = catalog.questions.len();

    for i in 0..total {
        assert_eq!(state.quiz.index, i);
        let answer = catalog.questions[i].answer.clone();
        let offered: Vec<String> = state
            .quiz
            .options(&catalog)
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert!(offered.contains(&answer), "question {i} offers {offered:?}");

        state = state.apply(&catalog, Action::AnswerQuiz(answer));
        assert!(state.quiz.answered && !state.quiz.wrong);
        assert_eq!(state.quiz.score as usize, i + 1);

        if i + 1 < total {
            state = state.apply(&catalog, Action::NextQuestion);
        }
    }

    let state = state.apply(&catalog, Action::NextQuestion);
    assert_eq!(state.quiz.index, 0);
    assert_eq!(state.quiz.score, 0);
    assert_eq!(state.quiz.round, 1);
    assert!(!state.quiz.answered);
}

#[test]
fn wrong_answer_is_final_for_the_question() {
    let (catalog, state) = start(7);
    let state = run(
        &catalog,
        state,
        vec![
            Action::AnswerQuiz("service_tier".into()),
            Action::AnswerQuiz("temperature".into()),
        ],
    );
    assert!(state.quiz.answered);
    assert!(state.quiz.wrong);
    assert_eq!(state.quiz.score, 0);
}

#[test]
fn quiz_options_depend_only_on_seed() {
    let (catalog, a) = start(99);
    let (_, b) = start(99);
    let ids = |s: &SessionState| -> Vec<String> {
        s.quiz.options(&catalog).iter().map(|p| p.id.clone()).collect()
    };
    assert_eq!(ids(&a), ids(&b));

    let distinct: HashSet<String> = ids(&a).into_iter().collect();
    assert_eq!(distinct.len(), 4);
}

#[test]
fn sandbox_edits_show_up_in_preview() {
    let (catalog, state) = start(1);
    let state = run(
        &catalog,
        state,
        vec![
            Action::SwitchMode(Mode::Sandbox),
            Action::EditRaw {
                id: "temperature".into(),
                raw: "0.2".into(),
            },
            Action::Step {
                id: "max_tokens".into(),
                direction: StepDirection::Down,
            },
            Action::Step {
                id: "response_format".into(),
                direction: StepDirection::Up,
            },
            Action::EditRaw {
                id: "metadata".into(),
                raw: "{\"team\": \"docs\"}".into(),
            },
        ],
    );

    let preview = sandbox_preview(&state.values);
    assert!(preview.contains("\"temperature\": 0.2,"));
    assert!(preview.contains("\"max_tokens\": 3996,"));
    assert!(preview.contains("\"response_format\": \"json_object\","));
    assert!(preview.ends_with("  \"metadata\": {\"team\": \"docs\"}\n}"));

    let parsed: serde_json::Value = serde_json::from_str(&preview).expect("preview is JSON");
    assert_eq!(parsed["metadata"]["team"], "docs");
}

#[test]
fn slider_edit_out_of_range_is_kept_until_stepped() {
    let (catalog, state) = start(1);
    let state = state.apply(
        &catalog,
        Action::EditRaw {
            id: "temperature".into(),
            raw: "5".into(),
        },
    );
    assert_eq!(state.values.get("temperature"), Some(&ParamValue::Number(5.0)));

    let state = state.apply(
        &catalog,
        Action::Step {
            id: "temperature".into(),
            direction: StepDirection::Up,
        },
    );
    assert_eq!(state.values.get("temperature"), Some(&ParamValue::Number(2.0)));
}

#[test]
fn explore_flow_tracks_learning_progress() {
    let (catalog, state) = start(1);
    let state = run(
        &catalog,
        state,
        vec![
            Action::SetFilter(CategoryFilter::Category("network".into())),
            Action::Select("timeout".into()),
            Action::MarkLearned("timeout".into()),
            Action::MarkLearned("max_retries".into()),
            Action::ClearSelection,
        ],
    );

    let visible: Vec<&str> = catalog
        .filtered(&state.filter)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(visible, vec!["timeout", "max_retries"]);
    assert!(state.selected.is_none());
    assert_eq!(state.learned.len(), 2);
    assert!((state.progress(&catalog) - 2.0 / catalog.len() as f64).abs() < 1e-12);
}

#[test]
fn export_catalog_prints_json() {
    let output = Command::new(env!("CARGO_BIN_EXE_paramlab"))
        .arg("--export-catalog")
        .output()
        .expect("failed to run paramlab");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("export is valid JSON");
    let params = json["parameters"].as_array().expect("parameters array");
    assert_eq!(params.len(), 13);
    assert_eq!(params[0]["id"], "temperature");
    assert_eq!(params[0]["control"]["kind"], "slider");
    assert_eq!(json["categories"].as_array().map(Vec::len), Some(9));
}
