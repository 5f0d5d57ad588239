use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    /// Identifier of the parameter that answers the question.
    pub answer: String,
    pub hint: String,
}
