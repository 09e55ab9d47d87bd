//! Selection tracking keyed by [`RowKey`].
//!
//! The selection is independent of filtering, sorting and paging: it only
//! changes through the operations below.

use crate::model::RowKey;
use std::collections::HashSet;

/// Selected row keys, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    order: Vec<RowKey>,
    members: HashSet<RowKey>,
}

impl SelectionSet {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Header checkbox: `true` selects exactly `page_keys`, `false` clears
    /// everything (not just the page).
    pub fn select_all<'a, I>(&mut self, checked: bool, page_keys: I)
    where
        I: IntoIterator<Item = &'a RowKey>,
    {
        self.clear();
        if checked {
            for key in page_keys {
                self.insert(key.clone());
            }
        }
    }

    /// Row checkbox.
    pub fn toggle(&mut self, key: &RowKey, checked: bool) {
        if checked {
            self.insert(key.clone());
        } else if self.members.remove(key) {
            self.order.retain(|k| k != key);
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    /// Keep only keys for which `keep` is true. Returns true if anything was
    /// removed.
    pub fn retain<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(&RowKey) -> bool,
    {
        let before = self.order.len();
        self.order.retain(|k| keep(k));
        if self.order.len() == before {
            return false;
        }
        self.members = self.order.iter().cloned().collect();
        true
    }

    /// True if `key` is selected.
    pub fn contains(&self, key: &RowKey) -> bool {
        self.members.contains(key)
    }

    /// Header checkbox state: the page is non-empty and fully selected.
    pub fn all_selected<'a, I>(&self, page_keys: I) -> bool
    where
        I: IntoIterator<Item = &'a RowKey>,
    {
        let mut any = false;
        for key in page_keys {
            if !self.contains(key) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Selected keys in the order they were selected.
    pub fn keys(&self) -> &[RowKey] {
        &self.order
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, key: RowKey) {
        if self.members.insert(key.clone()) {
            self.order.push(key);
        }
    }
}
