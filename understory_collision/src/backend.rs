// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial lookup of target regions.

use alloc::boxed::Box;
use core::fmt::Debug;

use kurbo::{Point, Rect};

/// Spatial backend abstraction used by [`TargetIndex`](crate::TargetIndex).
///
/// Backends only see slots and rectangles; payloads, generations and
/// registration order stay in the index. Query results must be yielded in
/// ascending slot order so that callers get reproducible iteration.
pub trait Backend: Debug {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, bounds: Rect);

    /// Update an existing slot's bounds.
    fn update(&mut self, slot: usize, bounds: Rect);

    /// Remove a slot from the spatial structure.
    fn remove(&mut self, slot: usize);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Query slots whose bounds contain the point (edges included).
    fn query_point<'a>(&'a self, point: Point) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// Query slots whose bounds intersect the rectangle.
    fn query_rect<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = usize> + 'a>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn insert(&mut self, slot: usize, bounds: Rect) {
        (**self).insert(slot, bounds);
    }

    fn update(&mut self, slot: usize, bounds: Rect) {
        (**self).update(slot, bounds);
    }

    fn remove(&mut self, slot: usize) {
        (**self).remove(slot);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn query_point<'a>(&'a self, point: Point) -> Box<dyn Iterator<Item = usize> + 'a> {
        (**self).query_point(point)
    }

    fn query_rect<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = usize> + 'a> {
        (**self).query_rect(rect)
    }
}
