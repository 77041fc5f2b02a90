//! The ordered member list shared by every container in the domain model.

use core::ops::Deref;

/// Whether a mutation changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The container was modified.
    Changed,
    /// The container was left as it was.
    Unchanged,
}

impl Change {
    /// Returns `true` for [`Change::Changed`].
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }

    /// Returns `true` for [`Change::Unchanged`].
    #[must_use]
    pub const fn is_unchanged(self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl From<bool> for Change {
    fn from(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }
}

/// An ordered list of owned members.
///
/// Read access goes through [`Deref`] to a slice, so `len`, `get`, `iter`,
/// `first` and friends are all available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssList<T> {
    items: Vec<T>,
}

impl<T> Default for CssList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> CssList<T> {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a member.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Insert a member at `index`; an index past the end appends.
    pub fn add_at(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Remove the member at `index`.
    pub fn remove_at(&mut self, index: usize) -> Change {
        if index < self.items.len() {
            let _ = self.items.remove(index);
            Change::Changed
        } else {
            Change::Unchanged
        }
    }

    /// Remove every member matching `pred`.
    pub fn remove_if(&mut self, pred: impl Fn(&T) -> bool) -> Change {
        let before = self.items.len();
        self.items.retain(|item| !pred(item));
        Change::from(self.items.len() != before)
    }

    /// Remove all members.
    pub fn remove_all(&mut self) -> Change {
        let changed = !self.items.is_empty();
        self.items.clear();
        Change::from(changed)
    }

    /// Replace the member at `index`, returning the old one.
    pub fn set(&mut self, index: usize, item: T) -> Option<T> {
        self.items.get_mut(index).map(|slot| core::mem::replace(slot, item))
    }

    /// Number of members.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there is at least one member.
    #[must_use]
    pub fn has_any(&self) -> bool {
        !self.items.is_empty()
    }

    /// Mutable access to the member at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Mutable iteration.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T: PartialEq> CssList<T> {
    /// Remove the first member equal to `item`.
    pub fn remove(&mut self, item: &T) -> Change {
        match self.items.iter().position(|candidate| candidate == item) {
            Some(index) => self.remove_at(index),
            None => Change::Unchanged,
        }
    }
}

impl<T: Clone> CssList<T> {
    /// An owned copy of all members.
    #[must_use]
    pub fn get_all(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> Deref for CssList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for CssList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for CssList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for CssList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a CssList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for CssList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
