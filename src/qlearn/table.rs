//! Storage for learned action-value ("Q") estimates.
//!
//! The table maps `(state, move)` pairs to real-valued estimates of the
//! expected future reward for taking that move in that state. Unwritten
//! pairs read as 0.0, entries are never removed, and all writes go through
//! the temporal-difference update in [`QTable::update`].

use rustc_hash::FxHashMap;

use crate::nim::{Move, Nim};

/// Immutable, content-hashed snapshot of a pile configuration.
///
/// Games mutate their piles in place, and a mutable sequence makes a poor
/// map key, so pile slices are frozen into `StateKey`s at the table
/// boundary. Two keys are equal iff their sequences are element-wise
/// equal; pile order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(Box<[u32]>);

impl From<&[u32]> for StateKey {
    fn from(piles: &[u32]) -> Self {
        StateKey(piles.into())
    }
}

impl StateKey {
    /// The pile sizes this key was frozen from.
    pub fn piles(&self) -> &[u32] {
        &self.0
    }
}

/// Tabular action-value storage.
///
/// Created once per training run and shared across every episode; it is
/// the only state that survives between episodes and the only artifact a
/// training run produces.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: FxHashMap<(StateKey, Move), f64>,
}

impl QTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Stored estimate for `(piles, mv)`, or 0.0 if the pair was never
    /// written.
    pub fn get(&self, piles: &[u32], mv: Move) -> f64 {
        self.values
            .get(&(StateKey::from(piles), mv))
            .copied()
            .unwrap_or(0.0)
    }

    /// Apply the temporal-difference update
    /// `Q ← Q + α·((reward + best_future) − Q)`,
    /// creating the entry if it did not exist.
    ///
    /// `alpha` is the learning rate in `(0, 1]`; `best_future` is the
    /// caller's estimate of the value obtainable from the successor state,
    /// normally [`QTable::best_future`] of it.
    pub fn update(&mut self, piles: &[u32], mv: Move, reward: f64, best_future: f64, alpha: f64) {
        let key = (StateKey::from(piles), mv);
        let old = self.values.get(&key).copied().unwrap_or(0.0);
        let new = old + alpha * ((reward + best_future) - old);
        self.values.insert(key, new);
    }

    /// Maximum stored estimate over the legal moves at `piles`.
    ///
    /// Returns 0.0 for a terminal configuration (no legal moves). Moves
    /// never written still contribute their default 0.0, so a state with
    /// only negative estimates has a best future of the least-bad of them,
    /// not zero.
    pub fn best_future(&self, piles: &[u32]) -> f64 {
        Nim::legal_moves(piles)
            .into_iter()
            .map(|mv| self.get(piles, mv))
            .fold(None, |best: Option<f64>, q| {
                Some(best.map_or(q, |b| b.max(q)))
            })
            .unwrap_or(0.0)
    }

    /// Number of `(state, move)` pairs that have been written.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True iff no pair has been written yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all stored entries, for analysis.
    pub fn iter(&self) -> impl Iterator<Item = (&(StateKey, Move), &f64)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_pairs_read_zero() {
        let table = QTable::new();
        assert_eq!(table.get(&[1, 3, 5, 7], Move::new(0, 1)), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_update_follows_td_rule() {
        let mut table = QTable::new();
        let piles = [1, 2];
        let mv = Move::new(1, 2);

        // From the 0.0 default: 0 + 0.5*((1 + 0) - 0) = 0.5
        table.update(&piles, mv, 1.0, 0.0, 0.5);
        assert_eq!(table.get(&piles, mv), 0.5);

        // From 0.5: 0.5 + 0.5*((-1 + 0.25) - 0.5) = -0.125
        let old = table.get(&piles, mv);
        table.update(&piles, mv, -1.0, 0.25, 0.5);
        assert_eq!(table.get(&piles, mv), old + 0.5 * ((-1.0 + 0.25) - old));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_state_keys_compare_by_content() {
        let mut table = QTable::new();
        let mv = Move::new(0, 1);
        table.update(&[2, 1], mv, 1.0, 0.0, 1.0);

        // A freshly built slice with equal content hits the same entry;
        // pile order matters.
        assert_eq!(table.get(&vec![2, 1], mv), 1.0);
        assert_eq!(table.get(&[1, 2], mv), 0.0);
    }

    #[test]
    fn test_best_future_is_zero_at_terminal() {
        let mut table = QTable::new();
        table.update(&[0, 0], Move::new(0, 1), 1.0, 0.0, 0.5);
        // Terminal states have no legal moves, whatever the table holds.
        assert_eq!(table.best_future(&[0, 0]), 0.0);
    }

    #[test]
    fn test_best_future_maximizes_over_legal_moves() {
        let mut table = QTable::new();
        let piles = [2, 1];
        table.update(&piles, Move::new(0, 1), -1.0, 0.0, 1.0);
        table.update(&piles, Move::new(0, 2), 0.5, 0.0, 1.0);
        // (1,1) is unwritten and reads 0.0, which loses to 0.5.
        assert_eq!(table.best_future(&piles), 0.5);

        // With every written estimate negative, the unwritten default wins.
        let mut table = QTable::new();
        table.update(&piles, Move::new(0, 1), -1.0, 0.0, 1.0);
        assert_eq!(table.best_future(&piles), 0.0);

        // All moves written and negative: best is the least negative.
        let mut table = QTable::new();
        let piles = [1];
        table.update(&piles, Move::new(0, 1), -0.75, 0.0, 1.0);
        assert_eq!(table.best_future(&piles), -0.75);
    }
}
