// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for persistence layer.
//!
//! This module contains all write operations for the persistence layer.

pub mod tours;

pub use tours::{SyncSummary, delete_tour, insert_tour, synchronize_tours, update_tour};
