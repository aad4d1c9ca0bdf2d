// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashSet;

use crate::error::DomainError;
use crate::tracking::{ChangeTracking, Identifiable, TrackedEntity, revive};

/// An unordered collection that tracks membership changes on top of the
/// content changes each item tracks itself.
///
/// Items are owned by value and addressed by identity. Three logical
/// buckets exist:
///
/// - baseline items, present as of the last [`accept_changes`](ChangeTracking::accept_changes)
/// - new items, added since then
/// - removed identities, baseline items tombstoned since then
///
/// A tombstoned baseline item keeps its value until the next accept so that
/// [`removed_items`](Self::removed_items) can report it. New items are never
/// tombstoned: removing one erases it.
#[derive(Debug, Clone)]
pub struct ChangeTrackingCollection<T: Identifiable> {
    current: Vec<T>,
    new: Vec<T>,
    removed: HashSet<T::Id>,
}

impl<T: Identifiable> Default for ChangeTrackingCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable> ChangeTrackingCollection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
            new: Vec::new(),
            removed: HashSet::new(),
        }
    }

    /// Returns the number of live items: baseline minus removed plus new.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len() + self.new.len() - self.removed.len()
    }

    /// Returns whether the collection has no live items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether `id` is a live member.
    #[must_use]
    pub fn contains(&self, id: T::Id) -> bool {
        self.new_position(id).is_some()
            || (self.current_position(id).is_some() && !self.removed.contains(&id))
    }

    /// Removes the item with the given identity.
    ///
    /// A new item is erased outright. A baseline item is tombstoned.
    ///
    /// # Returns
    ///
    /// `false` if the identity is unknown or already tombstoned.
    pub fn remove(&mut self, id: T::Id) -> bool {
        if let Some(position) = self.new_position(id) {
            self.new.remove(position);
            return true;
        }

        if self.current_position(id).is_some() {
            return self.removed.insert(id);
        }

        false
    }

    /// Removes every live item.
    ///
    /// New items are erased and every baseline item becomes tombstoned.
    pub fn clear(&mut self) {
        self.new.clear();
        self.removed.clear();
        self.removed.extend(self.current.iter().map(Identifiable::id));
    }

    /// Returns the live item with the given identity.
    #[must_use]
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.iter().find(|item| item.id() == id)
    }

    /// Returns the live item with the given identity for in-place mutation.
    pub fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.iter_mut().find(|item| item.id() == id)
    }

    /// Iterates over live items: baseline items first, then new items.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.current
            .iter()
            .filter(|item| !self.removed.contains(&item.id()))
            .chain(self.new.iter())
    }

    /// Iterates mutably over live items.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        let removed: &HashSet<T::Id> = &self.removed;
        self.current
            .iter_mut()
            .filter(move |item| !removed.contains(&item.id()))
            .chain(self.new.iter_mut())
    }

    /// Items added since the last accept.
    pub fn new_items(&self) -> impl Iterator<Item = &T> {
        self.new.iter()
    }

    /// Baseline items tombstoned since the last accept.
    pub fn removed_items(&self) -> impl Iterator<Item = &T> {
        self.current
            .iter()
            .filter(|item| self.removed.contains(&item.id()))
    }

    fn current_position(&self, id: T::Id) -> Option<usize> {
        self.current.iter().position(|item| item.id() == id)
    }

    fn new_position(&self, id: T::Id) -> Option<usize> {
        self.new.iter().position(|item| item.id() == id)
    }
}

impl<T: Identifiable + ChangeTracking> ChangeTrackingCollection<T> {
    /// Creates a collection whose items all form the accepted baseline.
    ///
    /// Each item has its own changes accepted, so loading never registers as
    /// a pending change. Later duplicates of an identity are dropped.
    #[must_use]
    pub fn from_baseline<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut collection: Self = Self::new();
        for mut item in items {
            if collection.current_position(item.id()).is_some() {
                continue;
            }
            item.accept_changes();
            collection.current.push(item);
        }
        collection
    }

    /// Baseline items, not removed, whose own content changed.
    ///
    /// New items are never reported here; their presence in
    /// [`new_items`](Self::new_items) already captures them.
    pub fn changed_items(&self) -> impl Iterator<Item = &T> {
        self.current
            .iter()
            .filter(|item| !self.removed.contains(&item.id()) && item.is_changed())
    }
}

impl<T: TrackedEntity> ChangeTrackingCollection<T> {
    /// Adds an item.
    ///
    /// Re-adding a tombstoned identity revives it as a baseline member instead
    /// of creating a new entry. A value that differs from the retained one
    /// replaces it and counts as changed.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateMembership`] if the identity is already live.
    pub fn add(&mut self, item: T) -> Result<(), DomainError> {
        let id: T::Id = item.id();

        if self.removed.remove(&id) {
            if let Some(position) = self.current_position(id) {
                revive(&mut self.current[position], item);
            }
            return Ok(());
        }

        if self.contains(id) {
            return Err(DomainError::DuplicateMembership { id: id.to_string() });
        }

        self.new.push(item);
        Ok(())
    }

    /// Adds several items at once.
    ///
    /// Either all items are added or none is.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateMembership`] if any identity is already
    /// live or appears twice in `items`.
    pub fn extend_new<I>(&mut self, items: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let mut seen: HashSet<T::Id> = HashSet::with_capacity(items.len());

        for item in &items {
            let id: T::Id = item.id();
            if !seen.insert(id) || self.contains(id) {
                return Err(DomainError::DuplicateMembership { id: id.to_string() });
            }
        }

        for item in items {
            self.add(item)?;
        }
        Ok(())
    }
}

impl<T: Identifiable + ChangeTracking> ChangeTracking for ChangeTrackingCollection<T> {
    fn is_changed(&self) -> bool {
        !self.new.is_empty() || !self.removed.is_empty() || self.changed_items().next().is_some()
    }

    fn accept_changes(&mut self) {
        let removed: HashSet<T::Id> = std::mem::take(&mut self.removed);
        self.current.retain(|item| !removed.contains(&item.id()));
        self.current.append(&mut self.new);

        for item in &mut self.current {
            item.accept_changes();
        }
    }
}
