use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::catalog::{Catalog, ParameterDescriptor};

pub const OPTIONS_PER_QUESTION: usize = 4;

/// Progress through the question list.
///
/// Each question goes Unanswered -> Answered(correct | wrong) and
/// [`QuizProgress::advance`] moves on to the next one. Wrapping past the last
/// question starts a new round with the score back at zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizProgress {
    pub index: usize,
    pub score: u32,
    pub answered: bool,
    pub wrong: bool,
    /// Number of completed passes through the question list.
    pub round: u64,
    pub seed: u64,
}

impl QuizProgress {
    pub fn new(seed: u64) -> Self {
        Self {
            index: 0,
            score: 0,
            answered: false,
            wrong: false,
            round: 0,
            seed,
        }
    }

    /// Record an answer to the current question. Returns false if the
    /// question was already answered, in which case nothing changes.
    pub fn answer(&mut self, catalog: &Catalog, answer_id: &str) -> bool {
        if self.answered {
            return false;
        }
        let correct = catalog
            .question(self.index)
            .is_some_and(|q| q.answer == answer_id);
        self.answered = true;
        self.wrong = !correct;
        if correct {
            self.score += 1;
        }
        true
    }

    /// Move to the next question. Returns false, changing nothing, while the
    /// current question is still unanswered.
    pub fn advance(&mut self, question_count: usize) -> bool {
        if !self.answered || question_count == 0 {
            return false;
        }
        let last = self.index + 1 >= question_count;
        self.index = (self.index + 1) % question_count;
        if last {
            self.score = 0;
            self.round += 1;
        }
        self.answered = false;
        self.wrong = false;
        true
    }

    pub fn options<'a>(&self, catalog: &'a Catalog) -> Vec<&'a ParameterDescriptor> {
        answer_options(catalog, self.index, self.round, self.seed)
    }
}

/// Choose the multiple-choice options for a question.
///
/// The correct parameter is always present, joined by distinct distractors
/// drawn from the rest of the catalog, for `min(4, catalog size)` options in
/// total. The result depends only on the arguments.
pub fn answer_options(
    catalog: &Catalog,
    question_index: usize,
    round: u64,
    seed: u64,
) -> Vec<&ParameterDescriptor> {
    let Some(question) = catalog.question(question_index) else {
        return Vec::new();
    };
    let mut rng = SmallRng::seed_from_u64(mix_seed(seed, round, question_index as u64));

    let correct = catalog.get(&question.answer);
    let distractors: Vec<&ParameterDescriptor> = catalog
        .parameters
        .iter()
        .filter(|p| p.id != question.answer)
        .collect();
    let wanted = OPTIONS_PER_QUESTION - usize::from(correct.is_some());

    let mut options: Vec<&ParameterDescriptor> = distractors
        .choose_multiple(&mut rng, wanted)
        .copied()
        .collect();
    options.extend(correct);
    options.shuffle(&mut rng);
    options
}

// splitmix64 finalizer over the three inputs, so neighbouring questions and
// rounds land far apart in seed space.
fn mix_seed(seed: u64, round: u64, index: u64) -> u64 {
    let mut z = seed
        ^ round.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ index.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
