use crate::logic::game::Action;

/// An action tagged with its ordering priority. Lower priority is explored
/// first; the orderer scores "promising" as small.
#[derive(Debug, Clone, Copy)]
pub struct ScoredAction {
    pub action: Action,
    pub priority: f64,
}

/// Ordered container for a node's candidate actions. The rope-placement
/// space grows with the board area, so this is heap-backed with a
/// reasonable pre-allocation rather than a fixed array.
#[derive(Debug, Default)]
pub struct ActionList {
    items: Vec<ScoredAction>,
}

impl ActionList {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, action: Action, priority: f64) {
        self.items.push(ScoredAction { action, priority });
    }

    /// Stable ascending sort by priority. NaN never occurs (priorities are
    /// sums of finite weights), but orders last if it ever did.
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| {
            a.priority
                .partial_cmp(&b.priority)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    pub fn retain<F: FnMut(&Action) -> bool>(&mut self, mut f: F) {
        self.items.retain(|s| f(&s.action));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredAction> {
        self.items.iter()
    }

    #[must_use]
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.items.iter().map(|s| s.action)
    }
}

impl<'a> IntoIterator for &'a ActionList {
    type Item = &'a ScoredAction;
    type IntoIter = std::slice::Iter<'a, ScoredAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ActionList {
    type Item = ScoredAction;
    type IntoIter = std::vec::IntoIter<ScoredAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
