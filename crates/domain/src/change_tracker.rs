// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Dirty-flag holder owned by exactly one entity.
///
/// Every mutable field of a tracked entity is written through
/// [`ChangeTracker::set_property`], so the flag is raised only when a value
/// actually differs from what was stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    changed: bool,
}

impl ChangeTracker {
    /// Creates a clean tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self { changed: false }
    }

    /// Returns whether any tracked field changed since the last accept.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// Raises the dirty flag without writing a field.
    pub const fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Clears the dirty flag unconditionally.
    pub const fn accept_changes(&mut self) {
        self.changed = false;
    }

    /// Writes `value` into `storage` if it differs from the stored value.
    ///
    /// # Arguments
    ///
    /// * `storage` - The field being written
    /// * `value` - The desired value
    ///
    /// # Returns
    ///
    /// `true` if the value was stored and the tracker marked dirty,
    /// `false` if the field already held an equal value.
    pub fn set_property<T: PartialEq>(&mut self, storage: &mut T, value: T) -> bool {
        if *storage == value {
            return false;
        }

        *storage = value;
        self.changed = true;
        true
    }
}

