// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequential mark id allocation.

use gridplot_core::MarkId;

/// Hands out document-unique [`MarkId`]s in allocation order.
///
/// The compositor threads one allocator through every stage, so ids follow paint order and
/// are identical across renders of the same figure.
#[derive(Clone, Debug, Default)]
pub struct MarkIds {
    next: u64,
}

impl MarkIds {
    /// Creates an allocator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id.
    pub fn next_id(&mut self) -> MarkId {
        let id = MarkId::from_raw(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next
    }
}
