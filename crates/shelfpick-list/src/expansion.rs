//! Position-keyed "variants visible" flags.
//!
//! Keys are row positions, so every list mutation that shifts rows has to
//! re-key the map. The realign functions are only called from
//! [`crate::ProductList`], inside the same mutation that moves the rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionMap {
    flags: BTreeMap<usize, bool>,
}

impl ExpansionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows without an entry are collapsed.
    #[must_use]
    pub fn is_expanded(&self, position: usize) -> bool {
        self.flags.get(&position).copied().unwrap_or(false)
    }

    /// Raw flag for `position`, `None` when the row was never toggled.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<bool> {
        self.flags.get(&position).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags.keys().copied()
    }

    pub(crate) fn set(&mut self, position: usize, expanded: bool) {
        self.flags.insert(position, expanded);
    }

    pub(crate) fn toggle(&mut self, position: usize) -> bool {
        let flag = self.flags.entry(position).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Re-keys the map for a single extract-and-reinsert of the row at `drag`
    /// to `hover`.
    ///
    /// The mapping is a bijection on `0..len`, so no two old keys can land on
    /// the same new key.
    pub(crate) fn realign_move(&mut self, drag: usize, hover: usize) {
        if drag == hover {
            return;
        }
        let lo = drag.min(hover);
        let hi = drag.max(hover);
        self.flags = std::mem::take(&mut self.flags)
            .into_iter()
            .map(|(key, expanded)| {
                let new_key = if key == drag {
                    hover
                } else if key < lo || key > hi {
                    key
                } else if drag < key && key <= hover {
                    key - 1
                } else {
                    // hover <= key < drag
                    key + 1
                };
                (new_key, expanded)
            })
            .collect();
    }

    /// Re-keys the map after the row at `position` was removed.
    pub(crate) fn realign_remove(&mut self, position: usize) {
        self.flags = std::mem::take(&mut self.flags)
            .into_iter()
            .filter_map(|(key, expanded)| match key.cmp(&position) {
                std::cmp::Ordering::Less => Some((key, expanded)),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some((key - 1, expanded)),
            })
            .collect();
    }

    /// Re-keys the map after the row at `position` was replaced by
    /// `batch_len` rows. The replaced row now shows a different product, so
    /// its flag is dropped.
    pub(crate) fn realign_replace(&mut self, position: usize, batch_len: usize) {
        let shift = batch_len.saturating_sub(1);
        self.flags = std::mem::take(&mut self.flags)
            .into_iter()
            .filter_map(|(key, expanded)| match key.cmp(&position) {
                std::cmp::Ordering::Less => Some((key, expanded)),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some((key + shift, expanded)),
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(usize, bool)]) -> ExpansionMap {
        let mut map = ExpansionMap::new();
        for &(k, v) in pairs {
            map.set(k, v);
        }
        map
    }

    fn pairs(map: &ExpansionMap) -> Vec<(usize, bool)> {
        map.keys().map(|k| (k, map.is_expanded(k))).collect()
    }

    #[test]
    fn moving_down_decrements_keys_inside_band() {
        let mut map = map_of(&[(1, true)]);
        map.realign_move(0, 2);
        assert_eq!(pairs(&map), vec![(0, true)]);
    }

    #[test]
    fn moved_row_carries_its_flag() {
        let mut map = map_of(&[(0, true), (3, false)]);
        map.realign_move(0, 3);
        assert_eq!(pairs(&map), vec![(2, false), (3, true)]);
    }

    #[test]
    fn moving_up_increments_keys_inside_band() {
        let mut map = map_of(&[(1, true), (2, false), (4, true)]);
        map.realign_move(3, 1);
        assert_eq!(pairs(&map), vec![(2, true), (3, false), (4, true)]);
    }

    #[test]
    fn keys_outside_band_are_untouched() {
        let mut map = map_of(&[(0, true), (5, true)]);
        map.realign_move(2, 3);
        assert_eq!(pairs(&map), vec![(0, true), (5, true)]);
    }

    #[test]
    fn move_then_inverse_restores_map() {
        let original = map_of(&[(0, true), (1, false), (2, true), (4, true), (6, false)]);
        for (a, b) in [(0, 4), (4, 0), (1, 6), (6, 2), (3, 3), (2, 5)] {
            let mut map = original.clone();
            map.realign_move(a, b);
            map.realign_move(b, a);
            assert_eq!(map, original, "move({a},{b}) then move({b},{a})");
        }
    }

    #[test]
    fn move_never_loses_keys() {
        let original = map_of(&[(0, true), (1, true), (2, true), (3, true), (4, true)]);
        for drag in 0..5 {
            for hover in 0..5 {
                let mut map = original.clone();
                map.realign_move(drag, hover);
                assert_eq!(map.len(), 5, "collision for move({drag},{hover})");
            }
        }
    }

    #[test]
    fn remove_drops_key_and_shifts_later_keys() {
        let mut map = map_of(&[(0, true), (2, true), (3, false)]);
        map.realign_remove(2);
        assert_eq!(pairs(&map), vec![(0, true), (2, false)]);
    }

    #[test]
    fn replace_drops_replaced_row_and_shifts_by_batch() {
        let mut map = map_of(&[(0, true), (1, true), (2, true)]);
        map.realign_replace(1, 3);
        assert_eq!(pairs(&map), vec![(0, true), (4, true)]);
    }

    #[test]
    fn replace_with_single_product_keeps_later_keys() {
        let mut map = map_of(&[(0, true), (2, true)]);
        map.realign_replace(0, 1);
        assert_eq!(pairs(&map), vec![(2, true)]);
    }

    #[test]
    fn toggle_flips_and_reports_new_state() {
        let mut map = ExpansionMap::new();
        assert!(map.toggle(1));
        assert!(map.is_expanded(1));
        assert!(!map.toggle(1));
        assert_eq!(map.get(1), Some(false));
        assert_eq!(map.get(0), None);
    }
}
