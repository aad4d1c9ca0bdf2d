// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::tracking::{ChangeTracking, Identifiable, TrackedEntity, revive};

/// Membership state of one slot in a [`ChangeTrackingList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeState {
    /// Present in the last accepted baseline.
    Current,
    /// Added since the last accept.
    New,
    /// Tombstoned: logically absent but kept until the next accept.
    Removed,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    state: ChangeState,
    item: T,
}

/// An ordered list that tracks membership changes.
///
/// The backing sequence interleaves live slots with tombstones. Callers only
/// ever see public indices, which count live slots; every positional
/// operation translates a public index into an internal slot index by
/// scanning forward. This costs O(n) per call and keeps no cached
/// prefix counts.
///
/// `New` slots are deleted outright when removed. `Current` slots are
/// flipped to `Removed` in place and only discarded by
/// [`accept_changes`](ChangeTracking::accept_changes).
///
/// Reviving a tombstone at a different place among the baseline items
/// changes the order, which counts as a change of the list until accepted.
#[derive(Debug, Clone)]
pub struct ChangeTrackingList<T> {
    slots: Vec<Slot<T>>,
    order_changed: bool,
}

impl<T> Default for ChangeTrackingList<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            order_changed: false,
        }
    }
}

impl<T: Identifiable> ChangeTrackingList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state != ChangeState::Removed)
            .count()
    }

    /// Returns whether the list has no live items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the live item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, DomainError> {
        let internal: usize = self.to_internal_index(index)?;
        Ok(&self.slots[internal].item)
    }

    /// Returns the live item at `index` for in-place mutation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, DomainError> {
        let internal: usize = self.to_internal_index(index)?;
        Ok(&mut self.slots[internal].item)
    }

    /// Removes the live item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<(), DomainError> {
        let internal: usize = self.to_internal_index(index)?;
        self.remove_slot(internal);
        Ok(())
    }

    /// Removes the item with the given identity.
    ///
    /// # Returns
    ///
    /// `false` if the identity is unknown or already tombstoned.
    pub fn remove(&mut self, id: T::Id) -> bool {
        match self.slot_position(id) {
            Some(position) if self.slots[position].state != ChangeState::Removed => {
                self.remove_slot(position);
                true
            }
            _ => false,
        }
    }

    /// Removes every live item.
    pub fn clear(&mut self) {
        self.slots.retain(|slot| slot.state != ChangeState::New);
        for slot in &mut self.slots {
            slot.state = ChangeState::Removed;
        }
    }

    /// Returns whether `id` is a live member.
    #[must_use]
    pub fn contains(&self, id: T::Id) -> bool {
        self.index_of(id).is_some()
    }

    /// Returns the public index of the live item with the given identity.
    #[must_use]
    pub fn index_of(&self, id: T::Id) -> Option<usize> {
        self.iter().position(|item| item.id() == id)
    }

    /// Returns the live item with the given identity.
    #[must_use]
    pub fn find(&self, id: T::Id) -> Option<&T> {
        self.iter().find(|item| item.id() == id)
    }

    /// Returns the live item with the given identity for in-place mutation.
    pub fn find_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.iter_mut().find(|item| item.id() == id)
    }

    /// Iterates over live items in list order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots
            .iter()
            .filter(|slot| slot.state != ChangeState::Removed)
            .map(|slot| &slot.item)
    }

    /// Iterates mutably over live items in list order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.state != ChangeState::Removed)
            .map(|slot| &mut slot.item)
    }

    /// Items added since the last accept, in list order.
    pub fn new_items(&self) -> impl Iterator<Item = &T> {
        self.items_in_state(ChangeState::New)
    }

    /// Baseline items tombstoned since the last accept.
    pub fn removed_items(&self) -> impl Iterator<Item = &T> {
        self.items_in_state(ChangeState::Removed)
    }

    /// Returns whether a revived item moved relative to the other baseline
    /// items since the last accept.
    #[must_use]
    pub const fn order_changed(&self) -> bool {
        self.order_changed
    }

    /// Counts the whole list as changed until the next accept, so its order
    /// is written again.
    pub const fn mark_order_changed(&mut self) {
        self.order_changed = true;
    }

    /// Returns the membership state of the slot holding `id`, tombstones included.
    #[must_use]
    pub fn state_of(&self, id: T::Id) -> Option<ChangeState> {
        self.slot_position(id)
            .map(|position| self.slots[position].state)
    }

    fn items_in_state(&self, state: ChangeState) -> impl Iterator<Item = &T> {
        self.slots
            .iter()
            .filter(move |slot| slot.state == state)
            .map(|slot| &slot.item)
    }

    fn remove_slot(&mut self, internal: usize) {
        if self.slots[internal].state == ChangeState::New {
            // never accepted, nothing to report
            self.slots.remove(internal);
        } else {
            self.slots[internal].state = ChangeState::Removed;
        }
    }

    /// Number of baseline slots, live or tombstoned, before `internal`.
    fn baseline_rank(&self, internal: usize) -> usize {
        self.slots[..internal]
            .iter()
            .filter(|slot| slot.state != ChangeState::New)
            .count()
    }

    fn slot_position(&self, id: T::Id) -> Option<usize> {
        self.slots.iter().position(|slot| slot.item.id() == id)
    }

    /// Maps a public index onto the internal slot of the Nth live item.
    fn to_internal_index(&self, index: usize) -> Result<usize, DomainError> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.state != ChangeState::Removed)
            .nth(index)
            .map(|(internal, _)| internal)
            .ok_or_else(|| DomainError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Like [`to_internal_index`](Self::to_internal_index) but also accepts
    /// `index == len()`, which maps past the last slot.
    fn insertion_index(&self, index: usize) -> Result<usize, DomainError> {
        let len: usize = self.len();
        match index.cmp(&len) {
            std::cmp::Ordering::Less => self.to_internal_index(index),
            std::cmp::Ordering::Equal => Ok(self.slots.len()),
            std::cmp::Ordering::Greater => Err(DomainError::IndexOutOfRange { index, len }),
        }
    }
}

impl<T: Identifiable + ChangeTracking> ChangeTrackingList<T> {
    /// Creates a list whose items all form the accepted baseline, in order.
    ///
    /// Later duplicates of an identity are dropped.
    #[must_use]
    pub fn from_baseline<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list: Self = Self::new();
        for mut item in items {
            if list.slot_position(item.id()).is_some() {
                continue;
            }
            item.accept_changes();
            list.slots.push(Slot {
                state: ChangeState::Current,
                item,
            });
        }
        list
    }

    /// Baseline items, not removed, whose own content changed.
    pub fn changed_items(&self) -> impl Iterator<Item = &T> {
        self.items_in_state(ChangeState::Current)
            .filter(|item| item.is_changed())
    }
}

impl<T: TrackedEntity> ChangeTrackingList<T> {
    /// Replaces the item at `index`.
    ///
    /// Equivalent to [`remove_at`](Self::remove_at) followed by
    /// [`insert`](Self::insert) at the same index, so replacing a baseline
    /// item with a value of the same identity keeps it a baseline member.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] if `index >= len()`, or
    /// [`DomainError::DuplicateMembership`] if the new identity is live at
    /// another position. The list is unchanged on error.
    pub fn set(&mut self, index: usize, item: T) -> Result<(), DomainError> {
        let internal: usize = self.to_internal_index(index)?;

        if let Some(existing) = self.slot_position(item.id())
            && existing != internal
            && self.slots[existing].state != ChangeState::Removed
        {
            return Err(DomainError::DuplicateMembership {
                id: item.id().to_string(),
            });
        }

        self.remove_at(index)?;
        self.insert(index, item)
    }

    /// Inserts `item` so that it ends up at public `index`.
    ///
    /// `index == len()` appends. If the identity is currently tombstoned the
    /// tombstone is revived as a baseline member and its slot relocated to
    /// the target position. A value that differs from the tombstoned one
    /// counts as changed.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] if `index > len()`, or
    /// [`DomainError::DuplicateMembership`] if the identity is already live.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), DomainError> {
        let mut target: usize = self.insertion_index(index)?;
        let id: T::Id = item.id();

        match self.slot_position(id) {
            Some(position) if self.slots[position].state != ChangeState::Removed => {
                Err(DomainError::DuplicateMembership { id: id.to_string() })
            }
            Some(position) => {
                let rank: usize = self.baseline_rank(position);
                let mut slot: Slot<T> = self.slots.remove(position);
                // removing the tombstone shifts every later slot down by one
                if position < target {
                    target -= 1;
                }
                if self.baseline_rank(target) != rank {
                    self.order_changed = true;
                }

                revive(&mut slot.item, item);
                slot.state = ChangeState::Current;
                self.slots.insert(target, slot);
                Ok(())
            }
            None => {
                self.slots.insert(
                    target,
                    Slot {
                        state: ChangeState::New,
                        item,
                    },
                );
                Ok(())
            }
        }
    }

    /// Appends `item` at the end.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateMembership`] if the identity is already live.
    pub fn push(&mut self, item: T) -> Result<(), DomainError> {
        self.insert(self.len(), item)
    }
}

impl<T: Identifiable + ChangeTracking> ChangeTracking for ChangeTrackingList<T> {
    fn is_changed(&self) -> bool {
        self.order_changed
            || self.slots.iter().any(|slot| match slot.state {
                ChangeState::Current => slot.item.is_changed(),
                ChangeState::New | ChangeState::Removed => true,
            })
    }

    fn accept_changes(&mut self) {
        self.order_changed = false;
        self.slots
            .retain(|slot| slot.state != ChangeState::Removed);
        for slot in &mut self.slots {
            slot.state = ChangeState::Current;
            slot.item.accept_changes();
        }
    }
}
