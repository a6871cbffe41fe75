//! Selection state over observations and available blocks.
//!
//! Selection is plain state with query functions; the interaction controller
//! decides when transitions fire. Observations and available blocks are
//! mutually exclusive in a selection: picking one kind always clears the
//! other. A multi-selection only ever holds observations, and collapsing to
//! one member yields the single-observation state so the edit form contract
//! (visible and writable only for exactly one observation) falls out of the
//! variant alone.

use crate::api::{AvailableBlockId, ObservationId};

/// Current selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    /// Exactly one observation: edit form visible and writable.
    Observation(ObservationId),
    /// Exactly one available block: edit form visible, read-only.
    Available(AvailableBlockId),
    /// Two or more observations: edit form hidden. Never holds fewer than
    /// two ids; smaller sets collapse to `Observation` or `Empty`.
    Observations(Vec<ObservationId>),
}

impl Selection {
    /// Plain click on an observation: replace whatever was selected.
    pub fn click_observation(&mut self, id: ObservationId) {
        *self = Selection::Observation(id);
    }

    /// Plain click on an available block: replace whatever was selected.
    pub fn click_available(&mut self, id: AvailableBlockId) {
        *self = Selection::Available(id);
    }

    /// Shift-click on an observation: toggle its membership in the current
    /// observation set. Any available-block selection is discarded first.
    pub fn shift_click_observation(&mut self, id: ObservationId) {
        let mut ids = self.observation_ids();
        if let Some(pos) = ids.iter().position(|existing| *existing == id) {
            ids.remove(pos);
        } else {
            ids.push(id);
        }
        *self = Selection::from_observation_ids(ids);
    }

    /// Replace the selection with a set of observations (lasso without
    /// shift).
    pub fn replace_observations(&mut self, ids: Vec<ObservationId>) {
        *self = Selection::from_observation_ids(dedup_in_order(ids));
    }

    /// Union a set of observations into the current selection (lasso with
    /// shift). Any available-block selection is discarded first.
    pub fn union_observations(&mut self, ids: Vec<ObservationId>) {
        let mut merged = self.observation_ids();
        merged.extend(ids);
        *self = Selection::from_observation_ids(dedup_in_order(merged));
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        *self = Selection::Empty;
    }

    /// All selected observation ids, in selection order.
    pub fn observation_ids(&self) -> Vec<ObservationId> {
        match self {
            Selection::Observation(id) => vec![*id],
            Selection::Observations(ids) => ids.clone(),
            _ => Vec::new(),
        }
    }

    /// The selected observation when exactly one is selected.
    pub fn single_observation(&self) -> Option<ObservationId> {
        match self {
            Selection::Observation(id) => Some(*id),
            _ => None,
        }
    }

    /// The selected available block when exactly one is selected.
    pub fn single_available(&self) -> Option<AvailableBlockId> {
        match self {
            Selection::Available(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    pub fn contains_observation(&self, id: ObservationId) -> bool {
        match self {
            Selection::Observation(selected) => *selected == id,
            Selection::Observations(ids) => ids.contains(&id),
            _ => false,
        }
    }

    fn from_observation_ids(ids: Vec<ObservationId>) -> Self {
        match ids.len() {
            0 => Selection::Empty,
            1 => Selection::Observation(ids[0]),
            _ => Selection::Observations(ids),
        }
    }
}

fn dedup_in_order(ids: Vec<ObservationId>) -> Vec<ObservationId> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(n: u64) -> ObservationId {
        ObservationId::new(n)
    }

    fn block(n: u64) -> AvailableBlockId {
        AvailableBlockId::new(n)
    }

    #[test]
    fn test_plain_click_replaces() {
        let mut sel = Selection::Empty;
        sel.click_observation(obs(1));
        assert_eq!(sel.single_observation(), Some(obs(1)));

        sel.click_observation(obs(2));
        assert_eq!(sel.single_observation(), Some(obs(2)));
    }

    #[test]
    fn test_kinds_are_mutually_exclusive() {
        let mut sel = Selection::Empty;
        sel.click_observation(obs(1));
        sel.click_available(block(9));
        assert_eq!(sel.single_available(), Some(block(9)));
        assert!(sel.observation_ids().is_empty());

        sel.shift_click_observation(obs(2));
        assert_eq!(sel.single_available(), None);
        assert_eq!(sel.single_observation(), Some(obs(2)));
    }

    #[test]
    fn test_shift_click_toggles_membership() {
        let mut sel = Selection::Empty;
        sel.shift_click_observation(obs(1));
        sel.shift_click_observation(obs(2));
        assert_eq!(sel.observation_ids(), vec![obs(1), obs(2)]);
        // Two selected: no single observation for the form.
        assert_eq!(sel.single_observation(), None);

        // Toggling one off collapses back to a single selection.
        sel.shift_click_observation(obs(1));
        assert_eq!(sel.single_observation(), Some(obs(2)));

        // Toggling the last one off empties the selection.
        sel.shift_click_observation(obs(2));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_replace_and_union() {
        let mut sel = Selection::Empty;
        sel.shift_click_observation(obs(1));
        sel.replace_observations(vec![obs(2), obs(3)]);
        assert_eq!(sel.observation_ids(), vec![obs(2), obs(3)]);

        sel.union_observations(vec![obs(3), obs(4)]);
        assert_eq!(sel.observation_ids(), vec![obs(2), obs(3), obs(4)]);
    }

    #[test]
    fn test_replace_with_single_collapses() {
        let mut sel = Selection::Empty;
        sel.replace_observations(vec![obs(7)]);
        assert_eq!(sel, Selection::Observation(obs(7)));

        sel.replace_observations(Vec::new());
        assert!(sel.is_empty());
    }

    #[test]
    fn test_contains_observation() {
        let mut sel = Selection::Empty;
        sel.replace_observations(vec![obs(1), obs(2)]);
        assert!(sel.contains_observation(obs(1)));
        assert!(!sel.contains_observation(obs(3)));
    }
}
