use crate::logic::game::Action;

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub value: f64,
    pub action: Option<Action>,
    occupied: bool,
}

impl Default for TTEntry {
    fn default() -> Self {
        Self {
            key: 0,
            depth: 0,
            value: 0.0,
            action: None,
            occupied: false,
        }
    }
}

/// Fixed-size transposition table with power-of-two masking.
///
/// Entries memoize `(depth, value, best action)` for a state fingerprint.
/// A probe only answers when the cached entry was searched at least as
/// deep as the request: a shallow entry never satisfies a deeper query.
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    mask: usize,
    used: usize,
}

impl TranspositionTable {
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<TTEntry>();
        let num_entries = (size_mb * 1024 * 1024) / entry_size;

        // Largest power of two within the budget.
        let mut size = 1;
        while size * 2 <= num_entries {
            size *= 2;
        }
        if size < 1024 {
            size = 1024;
        }

        Self {
            entries: vec![TTEntry::default(); size],
            mask: size - 1,
            used: 0,
        }
    }

    /// Depth-guarded lookup: returns the entry only if its key matches and
    /// it was stored from a search at least `depth` deep.
    #[must_use]
    pub fn probe(&self, key: u64, depth: u8) -> Option<TTEntry> {
        let entry = self.entries[(key as usize) & self.mask];
        if entry.occupied && entry.key == key && entry.depth >= depth {
            Some(entry)
        } else {
            None
        }
    }

    /// Replace on collision or when the new result is at least as deep.
    pub fn store(&mut self, key: u64, depth: u8, value: f64, action: Option<Action>) {
        let idx = (key as usize) & self.mask;
        let entry = &mut self.entries[idx];
        if !entry.occupied {
            self.used += 1;
        } else if entry.key == key && depth < entry.depth {
            return;
        }
        *entry = TTEntry {
            key,
            depth,
            value,
            action,
            occupied: true,
        };
    }

    /// Number of occupied slots, for diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            *entry = TTEntry::default();
        }
        self.used = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Position;

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(1);
        let action = Some(Action::Move(Position::new(1, 1)));
        tt.store(42, 3, 12.5, action);

        let entry = tt.probe(42, 3).unwrap();
        assert_eq!(entry.depth, 3);
        assert!((entry.value - 12.5).abs() < f64::EPSILON);
        assert_eq!(entry.action, action);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_depth_guard_rejects_shallow_entries() {
        let mut tt = TranspositionTable::new(1);
        tt.store(42, 2, 7.0, None);
        assert!(tt.probe(42, 3).is_none());
        assert!(tt.probe(42, 2).is_some());
        assert!(tt.probe(42, 1).is_some());
    }

    #[test]
    fn test_shallower_store_keeps_deeper_entry() {
        let mut tt = TranspositionTable::new(1);
        tt.store(42, 4, 1.0, None);
        tt.store(42, 2, 9.0, None);
        let entry = tt.probe(42, 4).unwrap();
        assert_eq!(entry.depth, 4);
        assert!((entry.value - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_key_mismatch_misses() {
        let mut tt = TranspositionTable::new(1);
        tt.store(42, 2, 7.0, None);
        // Same slot (key differs by a multiple of the table size) must not
        // answer for a different state.
        let colliding = 42 + (tt.capacity() as u64);
        assert!(tt.probe(colliding, 1).is_none());
    }

    #[test]
    fn test_clear_resets() {
        let mut tt = TranspositionTable::new(1);
        tt.store(42, 2, 7.0, None);
        tt.clear();
        assert!(tt.probe(42, 0).is_none());
        assert!(tt.is_empty());
    }
}
