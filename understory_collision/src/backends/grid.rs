// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend. Cell-based spatial indexing with an origin offset.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect, Size};

use crate::backend::Backend;
use crate::types::{contains_point, overlaps};

type CellKey = (i64, i64);

/// Uniform grid backend.
///
/// Maps each rectangle to the cells it covers. Queries collect the slots of the
/// covered cells and then filter them exactly, so results match
/// [`FlatVec`](crate::FlatVec) for any cell size. Coordinates left of or above
/// `origin` are supported (cells get negative keys).
pub struct Grid {
    cell: Size,
    origin: Point,
    slots: Vec<Option<Rect>>,
    cells: BTreeMap<CellKey, Vec<usize>>,
}

impl Grid {
    /// Create a grid backend with the given cell size and origin offset.
    ///
    /// Cell dimensions must be positive.
    pub fn new(cell: Size, origin: Point) -> Self {
        debug_assert!(
            cell.width > 0.0 && cell.height > 0.0,
            "cell dimensions must be positive"
        );
        Self {
            cell,
            origin,
            slots: Vec::new(),
            cells: BTreeMap::new(),
        }
    }

    #[inline]
    fn floor_to_i64(v: f64) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Cell coordinates are bounded by the layout space, far inside i64."
        )]
        let i = v as i64;
        if (i as f64) > v { i - 1 } else { i }
    }

    fn key_for(&self, p: Point) -> CellKey {
        let cx = Self::floor_to_i64((p.x - self.origin.x) / self.cell.width);
        let cy = Self::floor_to_i64((p.y - self.origin.y) / self.cell.height);
        (cx, cy)
    }

    fn cells_for(&self, r: &Rect) -> impl Iterator<Item = CellKey> + use<> {
        let (minx, miny) = self.key_for(Point::new(r.x0, r.y0));
        let (maxx, maxy) = self.key_for(Point::new(r.x1, r.y1));
        (miny..=maxy).flat_map(move |y| (minx..=maxx).map(move |x| (x, y)))
    }

    fn link(&mut self, slot: usize, bounds: &Rect) {
        let keys: Vec<CellKey> = self.cells_for(bounds).collect();
        for key in keys {
            self.cells.entry(key).or_default().push(slot);
        }
    }

    fn unlink(&mut self, slot: usize) {
        let Some(Some(old)) = self.slots.get(slot).copied() else {
            return;
        };
        let keys: Vec<CellKey> = self.cells_for(&old).collect();
        for key in keys {
            if let Some(list) = self.cells.get_mut(&key) {
                if let Some(pos) = list.iter().position(|&s| s == slot) {
                    list.swap_remove(pos);
                }
                if list.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
    }

    fn exact(&self, slot: usize, keep: impl Fn(&Rect) -> bool) -> bool {
        matches!(self.slots.get(slot), Some(Some(r)) if keep(r))
    }
}

impl Backend for Grid {
    fn insert(&mut self, slot: usize, bounds: Rect) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        self.unlink(slot);
        self.slots[slot] = Some(bounds);
        self.link(slot, &bounds);
    }

    fn update(&mut self, slot: usize, bounds: Rect) {
        if slot >= self.slots.len() {
            return;
        }
        self.unlink(slot);
        self.slots[slot] = Some(bounds);
        self.link(slot, &bounds);
    }

    fn remove(&mut self, slot: usize) {
        self.unlink(slot);
        if let Some(e) = self.slots.get_mut(slot) {
            *e = None;
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.cells.clear();
    }

    fn query_point<'a>(&'a self, point: Point) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut set = BTreeSet::new();
        if let Some(slots) = self.cells.get(&self.key_for(point)) {
            set.extend(
                slots
                    .iter()
                    .copied()
                    .filter(|&s| self.exact(s, |r| contains_point(r, point))),
            );
        }
        Box::new(set.into_iter())
    }

    fn query_rect<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut set = BTreeSet::new();
        for key in self.cells_for(&rect) {
            if let Some(slots) = self.cells.get(&key) {
                set.extend(
                    slots
                        .iter()
                        .copied()
                        .filter(|&s| self.exact(s, |r| overlaps(r, &rect))),
                );
            }
        }
        Box::new(set.into_iter())
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|e| e.is_some()).count();
        f.debug_struct("Grid")
            .field("cell", &self.cell)
            .field("origin", &self.origin)
            .field("total_slots", &total)
            .field("alive", &alive)
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::FlatVec;
    use alloc::vec;

    fn both() -> (Grid, FlatVec) {
        (
            Grid::new(Size::new(16.0, 16.0), Point::new(-32.0, -32.0)),
            FlatVec::default(),
        )
    }

    #[test]
    fn grid_matches_flatvec() {
        let (mut g, mut f) = both();
        let rects = [
            Rect::new(-20.0, -20.0, 5.0, 5.0),
            Rect::new(0.0, 0.0, 100.0, 40.0),
            Rect::new(30.0, 30.0, 31.0, 31.0),
        ];
        for (i, r) in rects.iter().enumerate() {
            g.insert(i, *r);
            f.insert(i, *r);
        }
        for p in [
            Point::new(0.0, 0.0),
            Point::new(-10.0, -10.0),
            Point::new(30.5, 30.5),
            Point::new(200.0, 200.0),
        ] {
            let a: Vec<_> = g.query_point(p).collect();
            let b: Vec<_> = f.query_point(p).collect();
            assert_eq!(a, b, "point {p:?}");
        }
        let q = Rect::new(25.0, 25.0, 35.0, 35.0);
        assert_eq!(
            g.query_rect(q).collect::<Vec<_>>(),
            f.query_rect(q).collect::<Vec<_>>()
        );
    }

    #[test]
    fn update_moves_slot_between_cells() {
        let (mut g, _) = both();
        g.insert(0, Rect::new(0.0, 0.0, 10.0, 10.0));
        g.update(0, Rect::new(100.0, 100.0, 110.0, 110.0));
        assert_eq!(g.query_point(Point::new(5.0, 5.0)).count(), 0);
        assert_eq!(
            g.query_point(Point::new(105.0, 105.0)).collect::<Vec<_>>(),
            vec![0]
        );
        g.remove(0);
        assert_eq!(g.query_point(Point::new(105.0, 105.0)).count(), 0);
        assert!(g.cells.is_empty(), "empty cells are dropped");
    }
}
