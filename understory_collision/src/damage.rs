// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched damage returned by [`TargetIndex::commit`](crate::TargetIndex::commit).

use alloc::vec::Vec;

use kurbo::Rect;

/// Target regions that changed since the previous commit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Damage {
    /// Regions of newly added targets.
    pub added: Vec<Rect>,
    /// Regions of removed targets.
    pub removed: Vec<Rect>,
    /// Targets whose region changed: (old, new).
    pub moved: Vec<(Rect, Rect)>,
}

impl Damage {
    /// True if no damage entries recorded.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.moved.is_empty()
    }

    /// Number of recorded entries (a move counts once).
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.moved.len()
    }

    /// Union of all affected regions. Returns `None` if empty.
    pub fn union(&self) -> Option<Rect> {
        let mut it = self
            .added
            .iter()
            .copied()
            .chain(self.removed.iter().copied())
            .chain(self.moved.iter().flat_map(|(a, b)| [*a, *b]));
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }
}
