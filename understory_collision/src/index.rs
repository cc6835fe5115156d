// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `TargetIndex` API, generic over a spatial backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::backend::Backend;
use crate::backends::FlatVec;
use crate::damage::Damage;
use crate::select::{Collision, pick_best};
use crate::strategy::CollisionStrategy;
use crate::types::Probe;

/// Generational handle for targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(u32, u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Target keys are 32-bit; an index never holds 2^32 targets."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mark {
    Added,
    Updated,
    Removed,
}

#[derive(Clone, Debug)]
struct Entry<P> {
    generation: u32,
    bounds: Rect,
    payload: P,
    order: u64,
    mark: Option<Mark>,
    prev_bounds: Option<Rect>,
}

/// Options for [`TargetIndex::best_at`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct QueryOptions {
    /// Candidates scoring above this are ignored.
    pub max_score: Option<f64>,
}

/// An index of drop-target regions.
///
/// Each target carries a payload and a registration stamp. Stamps increase
/// monotonically and survive slot reuse, so equal-score ties resolve to the
/// target that was inserted first even after removals.
///
/// Like the rest of Understory, changes are staged: `insert`, `update` and
/// `remove` take effect in queries after [`commit`](Self::commit), which also
/// reports the [`Damage`] since the previous commit.
#[derive(Debug)]
pub struct TargetIndex<P: Copy + Debug, B: Backend = FlatVec> {
    entries: Vec<Option<Entry<P>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    next_order: u64,
    backend: B,
}

impl<P: Copy + Debug, B: Backend + Default> TargetIndex<P, B> {
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<P: Copy + Debug, B: Backend + Default> Default for TargetIndex<P, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy + Debug, B: Backend> TargetIndex<P, B> {
    /// Create an empty index over an explicit backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            next_order: 0,
            backend,
        }
    }

    /// Number of live targets, staged ones included.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .flatten()
            .filter(|e| e.mark != Some(Mark::Removed))
            .count()
    }

    /// True if no live targets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a target region with payload. Returns a stable handle.
    pub fn insert(&mut self, bounds: Rect, payload: P) -> Key {
        let order = self.next_order;
        self.next_order += 1;
        let idx = match self.free_list.pop() {
            Some(idx) => idx,
            None => {
                self.entries.push(None);
                self.generations.push(0);
                self.entries.len() - 1
            }
        };
        let generation = self.generations[idx] + 1;
        self.generations[idx] = generation;
        self.entries[idx] = Some(Entry {
            generation,
            bounds,
            payload,
            order,
            mark: Some(Mark::Added),
            prev_bounds: None,
        });
        Key::new(idx, generation)
    }

    /// Stage a new region for a target. Stale keys are ignored.
    pub fn update(&mut self, key: Key, bounds: Rect) {
        if let Some(e) = self.entry_mut(key) {
            if e.bounds == bounds || e.mark == Some(Mark::Removed) {
                return;
            }
            if e.mark.is_none() {
                e.prev_bounds = Some(e.bounds);
            }
            e.bounds = bounds;
            e.mark = Some(match e.mark {
                Some(Mark::Added) => Mark::Added,
                _ => Mark::Updated,
            });
        }
    }

    /// Stage removal of a target. Stale keys are ignored.
    pub fn remove(&mut self, key: Key) {
        if let Some(e) = self.entry_mut(key) {
            if matches!(e.mark, Some(Mark::Added)) {
                self.entries[key.idx()] = None;
                self.free_list.push(key.idx());
            } else {
                e.mark = Some(Mark::Removed);
            }
        }
    }

    /// Clear the index (without reporting damage).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generations.clear();
        self.free_list.clear();
        self.backend.clear();
    }

    /// Whether `key` refers to a live target.
    pub fn contains(&self, key: Key) -> bool {
        self.entry(key).is_some_and(|e| e.mark != Some(Mark::Removed))
    }

    /// Latest (possibly staged) region and payload of a target.
    pub fn get(&self, key: Key) -> Option<(Rect, P)> {
        self.entry(key)
            .filter(|e| e.mark != Some(Mark::Removed))
            .map(|e| (e.bounds, e.payload))
    }

    /// Apply staged changes and compute batched damage.
    pub fn commit(&mut self) -> Damage {
        let mut dmg = Damage::default();
        for i in 0..self.entries.len() {
            let Some(entry) = self.entries[i].as_mut() else {
                continue;
            };
            match entry.mark.take() {
                Some(Mark::Added) => {
                    self.backend.insert(i, entry.bounds);
                    dmg.added.push(entry.bounds);
                }
                Some(Mark::Removed) => {
                    self.backend.remove(i);
                    dmg.removed.push(entry.bounds);
                    self.entries[i] = None;
                    self.free_list.push(i);
                }
                Some(Mark::Updated) => {
                    self.backend.update(i, entry.bounds);
                    if let Some(prev) = entry.prev_bounds.take()
                        && prev != entry.bounds
                    {
                        dmg.moved.push((prev, entry.bounds));
                    }
                }
                None => {}
            }
        }
        dmg
    }

    /// Committed targets whose region contains the point, in slot order.
    pub fn query_point(&self, point: Point) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend
            .query_point(point)
            .filter_map(|i| self.live_at(i).map(|e| (Key::new(i, e.generation), e.payload)))
    }

    /// Committed targets whose region intersects the rectangle, in slot order.
    pub fn query_rect(&self, rect: Rect) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend
            .query_rect(rect)
            .filter_map(|i| self.live_at(i).map(|e| (Key::new(i, e.generation), e.payload)))
    }

    /// Best committed target under the probe's pointer.
    ///
    /// Candidates are the targets whose region contains the pointer and that
    /// pass `filter`. Each is scored by `strategy`; the lowest score wins and
    /// equal scores go to the earliest inserted target.
    pub fn best_at<S, F>(
        &self,
        probe: &Probe,
        strategy: &S,
        options: QueryOptions,
        mut filter: F,
    ) -> Option<Collision<P>>
    where
        S: CollisionStrategy + ?Sized,
        F: FnMut(&P) -> bool,
    {
        let candidates = self.backend.query_point(probe.pointer).filter_map(|i| {
            let e = self.live_at(i)?;
            if !filter(&e.payload) {
                return None;
            }
            let score = strategy.score(probe, e.bounds)?;
            if options.max_score.is_some_and(|max| score > max) {
                return None;
            }
            Some(Collision {
                payload: e.payload,
                score,
                order: e.order,
            })
        });
        pick_best(candidates)
    }

    fn live_at(&self, i: usize) -> Option<&Entry<P>> {
        self.entries.get(i)?.as_ref()
    }

    fn entry(&self, key: Key) -> Option<&Entry<P>> {
        let e = self.entries.get(key.idx())?.as_ref()?;
        (e.generation == key.1).then_some(e)
    }

    fn entry_mut(&mut self, key: Key) -> Option<&mut Entry<P>> {
        let e = self.entries.get_mut(key.idx())?.as_mut()?;
        if e.generation != key.1 {
            return None;
        }
        Some(e)
    }
}

/// Index backed by a uniform [`Grid`](crate::Grid).
pub type GridIndex<P> = TargetIndex<P, crate::backends::Grid>;

impl<P: Copy + Debug> GridIndex<P> {
    /// Create a grid-backed index with the given cell size and origin.
    pub fn with_grid(cell: kurbo::Size, origin: Point) -> Self {
        Self::with_backend(crate::backends::Grid::new(cell, origin))
    }
}
