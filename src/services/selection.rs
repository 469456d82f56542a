//! Selection sets over record ids
//!
//! A selection is a plain set value. The pure operations (`toggled`,
//! `with_all`, `pruned`) return a new set; the in-place variants are what
//! [`crate::session::Session`] uses to keep its selections in step with the
//! record collections.

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id: Eq + Hash> {
    ids: HashSet<Id>,
}

impl<Id: Eq + Hash> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            ids: HashSet::new(),
        }
    }
}

impl<Id: Eq + Hash + Clone> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = Id>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &HashSet<Id> {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.ids.iter()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Flip membership of `id`; returns whether it is now selected
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Select exactly the filtered ids, or clear if that is already the selection
    pub fn select_all(&mut self, filtered: impl IntoIterator<Item = Id>) {
        let filtered: HashSet<Id> = filtered.into_iter().collect();
        if self.ids == filtered {
            self.ids.clear();
        } else {
            self.ids = filtered;
        }
    }

    /// Drop ids that were just deleted
    pub fn prune<'a>(&mut self, removed: impl IntoIterator<Item = &'a Id>)
    where
        Id: 'a,
    {
        for id in removed {
            self.ids.remove(id);
        }
    }

    /// Keep only ids still present in the full collection
    pub fn retain_present(&mut self, present: &HashSet<Id>) {
        self.ids.retain(|id| present.contains(id));
    }

    pub fn toggled(&self, id: Id) -> Self {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    pub fn with_all(&self, filtered: impl IntoIterator<Item = Id>) -> Self {
        let mut next = self.clone();
        next.select_all(filtered);
        next
    }

    pub fn pruned<'a>(&self, removed: impl IntoIterator<Item = &'a Id>) -> Self
    where
        Id: 'a,
    {
        let mut next = self.clone();
        next.prune(removed);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;

    fn id(s: &str) -> ExpenseId {
        ExpenseId::from(s)
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle(id("a")));
        assert!(selection.contains(&id("a")));
        assert!(!selection.toggle(id("a")));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggled_leaves_original() {
        let original: Selection<ExpenseId> = Selection::new();
        let next = original.toggled(id("a"));
        assert!(original.is_empty());
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_select_all_replaces_then_clears() {
        let mut selection = Selection::from_ids([id("x")]);

        selection.select_all([id("a"), id("b")]);
        assert_eq!(selection, Selection::from_ids([id("a"), id("b")]));

        // same set again, in any order, clears
        selection.select_all([id("b"), id("a")]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_same_size_different_ids_replaces() {
        let mut selection = Selection::from_ids([id("a"), id("b")]);
        selection.select_all([id("b"), id("c")]);
        assert_eq!(selection, Selection::from_ids([id("b"), id("c")]));
    }

    #[test]
    fn test_with_all_on_empty_filter() {
        let selection = Selection::from_ids([id("a")]);
        assert!(selection.with_all(Vec::new()).is_empty());

        let empty: Selection<ExpenseId> = Selection::new();
        assert!(empty.with_all(Vec::new()).is_empty());
    }

    #[test]
    fn test_prune() {
        let selection = Selection::from_ids([id("a"), id("b"), id("c")]);
        let removed = [id("b"), id("zzz")];

        let pruned = selection.pruned(removed.iter());
        assert_eq!(pruned, Selection::from_ids([id("a"), id("c")]));
    }

    #[test]
    fn test_retain_present() {
        let mut selection = Selection::from_ids([id("a"), id("b")]);
        let present: HashSet<ExpenseId> = [id("b"), id("c")].into_iter().collect();
        selection.retain_present(&present);
        assert_eq!(selection, Selection::from_ids([id("b")]));
    }
}
