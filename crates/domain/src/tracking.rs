// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Capability of anything that accumulates changes until they are accepted.
///
/// Implemented by tracked entities (`Tour`, `LogEntry`) and by the
/// change-tracking containers themselves, so containers nest.
pub trait ChangeTracking {
    /// Returns whether there are changes that have not been accepted yet.
    fn is_changed(&self) -> bool;

    /// Collapses all pending changes into the new baseline.
    fn accept_changes(&mut self);
}

/// An entity with a stable identity used as its sole equality key for
/// container membership.
pub trait Identifiable {
    /// The identifier type. Assigned at creation, never reassigned.
    type Id: Copy + Eq + Hash + Debug + Display;

    /// Returns the identity of this entity.
    fn id(&self) -> Self::Id;
}

/// A tracked entity that containers can reconcile with another copy of
/// itself when a tombstoned member is added back.
pub trait TrackedEntity: Identifiable + ChangeTracking {
    /// Returns whether every tracked value equals the one in `other`.
    fn same_content(&self, other: &Self) -> bool;

    /// Raises the dirty flag so the whole entity is written on the next
    /// synchronize.
    fn mark_changed(&mut self);
}

/// Puts `incoming` in place of the tombstoned `stored` copy.
///
/// An equal value keeps the stored copy and its pending state. A different
/// value replaces it and is marked changed, whatever its own tracker says.
pub fn revive<T: TrackedEntity>(stored: &mut T, incoming: T) {
    if !stored.same_content(&incoming) {
        *stored = incoming;
        stored.mark_changed();
    }
}
