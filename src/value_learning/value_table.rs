//! Value table implementation for afterstate learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    tictactoe::{Board, Canonicalizer, Cells, Player, SymmetryGroup},
    types::StateKey,
};

/// Estimate and visit count stored for one canonical state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueEntry {
    /// Estimated probability that the learner wins from this state, in [0, 1]
    pub estimate: f64,
    /// Number of updates applied to this entry
    pub visits: u32,
}

/// Value table mapping canonical board states to win-probability estimates
///
/// Entries are created lazily on first lookup. A state won by `player` starts
/// at 1.0, a state lost by `player` or a full board starts at 0.0, and any other
/// state starts at `initial_value`. Entries are never removed.
#[derive(Debug, Clone)]
pub struct ValueTable {
    entries: HashMap<StateKey, ValueEntry>,
    canonicalizer: Canonicalizer,
    player: Player,
    initial_value: f64,
}

impl ValueTable {
    /// Create an empty table for the learner playing `player`
    pub fn new(player: Player, initial_value: f64, group: SymmetryGroup) -> Self {
        Self {
            entries: HashMap::new(),
            canonicalizer: Canonicalizer::new(group),
            player,
            initial_value,
        }
    }

    /// Canonical key of `cells` under this table's symmetry group
    pub fn key(&mut self, cells: &Cells) -> StateKey {
        self.canonicalizer.key(cells)
    }

    fn entry_mut(&mut self, key: StateKey) -> &mut ValueEntry {
        let (player, initial_value) = (self.player, self.initial_value);
        self.entries
            .entry(key)
            .or_insert_with_key(|key| default_entry(key, player, initial_value))
    }

    /// Entry for `cells`, initialising it with the default policy if unseen
    pub fn get(&mut self, cells: &Cells) -> ValueEntry {
        let key = self.key(cells);
        *self.entry_mut(key)
    }

    pub fn estimate(&mut self, cells: &Cells) -> f64 {
        self.get(cells).estimate
    }

    /// Move the estimate of `old` one incremental-average step toward the
    /// current estimate of `new`.
    ///
    /// `v_old <- v_old + (v_new - v_old) / (n_old + 1)`, then `n_old += 1`.
    pub fn update(&mut self, old: &Cells, new: &Cells) -> ValueEntry {
        let target = self.estimate(new);
        self.blend(old, target)
    }

    /// Average a final game reward into the estimate of `state`
    pub fn record_return(&mut self, state: &Cells, reward: f64) -> ValueEntry {
        self.blend(state, reward)
    }

    fn blend(&mut self, state: &Cells, target: f64) -> ValueEntry {
        let key = self.key(state);
        trace!(state = %key, target, "updating value estimate");

        let entry = self.entry_mut(key);
        entry.estimate += (target - entry.estimate) / f64::from(entry.visits + 1);
        entry.visits += 1;
        *entry
    }

    /// Entry stored under an already canonical key, without creating it
    pub fn lookup(&self, key: &StateKey) -> Option<&ValueEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &ValueEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn player(&self) -> Player {
        self.player
    }

}

fn default_entry(key: &StateKey, player: Player, initial_value: f64) -> ValueEntry {
    let cells = key.cells();
    let estimate = match Board::winner_of(&cells) {
        Some(winner) if winner == player => 1.0,
        Some(_) => 0.0,
        None if Board::legal_moves_of(&cells).is_empty() => 0.0,
        None => initial_value,
    };
    ValueEntry {
        estimate,
        visits: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tictactoe::parse_cells, types::DEFAULT_INITIAL_VALUE};

    fn table() -> ValueTable {
        ValueTable::new(Player::X, DEFAULT_INITIAL_VALUE, SymmetryGroup::Dihedral)
    }

    #[test]
    fn test_default_values() {
        let mut table = table();

        let won = parse_cells("XXXOO....").unwrap();
        let lost = parse_cells("OOOXX.X..").unwrap();
        let drawn = parse_cells("XOXOXOOXO").unwrap();
        let open = parse_cells("X...O....").unwrap();

        assert_eq!(table.get(&won), ValueEntry { estimate: 1.0, visits: 0 });
        assert_eq!(table.estimate(&lost), 0.0);
        assert_eq!(table.estimate(&drawn), 0.0);
        assert_eq!(table.estimate(&open), DEFAULT_INITIAL_VALUE);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_defaults_follow_learner_symbol() {
        let mut table = ValueTable::new(Player::O, 0.3, SymmetryGroup::Dihedral);
        assert_eq!(table.estimate(&parse_cells("OOOXX.X..").unwrap()), 1.0);
        assert_eq!(table.estimate(&parse_cells("XXXOO....").unwrap()), 0.0);
        assert_eq!(table.estimate(&parse_cells(".........").unwrap()), 0.3);
    }

    #[test]
    fn test_symmetric_states_share_entry() {
        let mut table = table();
        let corner = parse_cells("X........").unwrap();
        let mirrored = parse_cells("..X......").unwrap();
        let target = parse_cells("XXXOO....").unwrap();

        table.update(&corner, &target);
        assert_eq!(table.get(&mirrored).visits, 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_update_incremental_average() {
        let mut table = table();
        let state = parse_cells("X...O....").unwrap();
        let win = parse_cells("XXXOO....").unwrap();
        let loss = parse_cells("OOOXX.X..").unwrap();

        // 0.5 + (1 - 0.5) / 1
        let entry = table.update(&state, &win);
        assert_eq!(entry, ValueEntry { estimate: 1.0, visits: 1 });

        // 1 + (0 - 1) / 2
        let entry = table.update(&state, &loss);
        assert_eq!(entry, ValueEntry { estimate: 0.5, visits: 2 });

        // Targets are read, not written
        assert_eq!(table.get(&win).visits, 0);
    }

    #[test]
    fn test_constant_target_converges_without_overshoot() {
        let mut table = table();
        let state = parse_cells(".........").unwrap();
        for _ in 0..3 {
            table.record_return(&state, 0.0);
        }

        let target = 0.8;
        let mut previous = table.estimate(&state);
        assert_eq!(previous, 0.0);
        for _ in 0..200 {
            let entry = table.record_return(&state, target);
            assert!(entry.estimate > previous);
            assert!(entry.estimate <= target);
            previous = entry.estimate;
        }
        assert!(target - previous < 0.02);
    }

    #[test]
    fn test_lookup_does_not_insert() {
        let mut table = table();
        let key = StateKey::parse("........X").unwrap();
        assert!(table.lookup(&key).is_none());
        assert!(table.is_empty());

        table.get(&parse_cells("X........").unwrap());
        assert_eq!(table.lookup(&key).map(|e| e.visits), Some(0));
    }
}
