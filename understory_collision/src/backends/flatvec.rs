// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::backend::Backend;
use crate::types::{contains_point, overlaps};

/// Flat vector backend with linear scans.
#[derive(Default)]
pub struct FlatVec {
    slots: Vec<Option<Rect>>,
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|e| e.is_some()).count();
        f.debug_struct("FlatVec")
            .field("total_slots", &total)
            .field("alive", &alive)
            .finish_non_exhaustive()
    }
}

impl FlatVec {
    fn scan<'a>(&'a self, keep: impl Fn(&Rect) -> bool + 'a) -> impl Iterator<Item = usize> + 'a {
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().filter(|r| keep(r)).map(|_| i))
    }
}

impl Backend for FlatVec {
    fn insert(&mut self, slot: usize, bounds: Rect) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        self.slots[slot] = Some(bounds);
    }

    fn update(&mut self, slot: usize, bounds: Rect) {
        if let Some(e) = self.slots.get_mut(slot) {
            *e = Some(bounds);
        }
    }

    fn remove(&mut self, slot: usize) {
        if let Some(e) = self.slots.get_mut(slot) {
            *e = None;
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
    }

    fn query_point<'a>(&'a self, point: Point) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(self.scan(move |r| contains_point(r, point)))
    }

    fn query_rect<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(self.scan(move |r| overlaps(r, &rect)))
    }
}
