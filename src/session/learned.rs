use std::collections::BTreeSet;

/// Parameters the user has flagged as mastered. Only ever grows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LearnedSet {
    ids: BTreeSet<String>,
}

impl LearnedSet {
    /// Returns true if `id` was not already learned.
    pub fn mark(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Learned share of `total`, in `0.0..=1.0`.
    pub fn progress(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.ids.len() as f64 / total as f64
    }
}
