//! Items the point will collect.

use serde::{Deserialize, Serialize};

use crate::catalog::ItemId;

/// Selected item ids in first-selected order.
///
/// Ids are not checked against the loaded catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSelection {
    ids: Vec<ItemId>,
}

impl ItemSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `id` if present, adds it otherwise. Returns the new membership.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if let Some(pos) = self.ids.iter().position(|&selected| selected == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Materialises the membership into an owned sequence.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ItemId> {
        self.ids.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = ItemSelection::new();
        assert!(selection.toggle(ItemId(3)));
        assert!(selection.contains(ItemId(3)));
        assert!(!selection.toggle(ItemId(3)));
        assert!(selection.is_empty());
    }

    #[test]
    fn snapshot_keeps_first_selected_order() {
        let mut selection = ItemSelection::new();
        selection.toggle(ItemId(5));
        selection.toggle(ItemId(1));
        selection.toggle(ItemId(3));
        selection.toggle(ItemId(1));

        assert_eq!(selection.snapshot(), vec![ItemId(5), ItemId(3)]);
    }

    #[test]
    fn snapshot_is_detached_from_later_toggles() {
        let mut selection = ItemSelection::new();
        selection.toggle(ItemId(1));
        let taken = selection.snapshot();
        selection.toggle(ItemId(2));
        selection.toggle(ItemId(1));

        assert_eq!(taken, vec![ItemId(1)]);
    }

    #[test]
    fn ids_outside_the_catalog_are_accepted() {
        let mut selection = ItemSelection::new();
        assert!(selection.toggle(ItemId(9_999)));
        assert_eq!(selection.len(), 1);
    }

    proptest! {
        #[test]
        fn double_toggle_is_identity(
            seed in proptest::collection::vec(0u32..20, 0..10),
            id in 0u32..20,
        ) {
            let mut selection = ItemSelection::new();
            for s in seed {
                selection.toggle(ItemId(s));
            }
            let before = selection.clone();

            selection.toggle(ItemId(id));
            selection.toggle(ItemId(id));

            let mut after_ids = selection.snapshot();
            let mut before_ids = before.snapshot();
            after_ids.sort();
            before_ids.sort();
            prop_assert_eq!(after_ids, before_ids);
        }
    }
}
