// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision detection over the registry's containers and items.
//!
//! Container regions are mirrored into an `understory_collision` target index
//! and refreshed from the geometry providers before each detection. Item
//! regions are few per container and are read straight from the provider of
//! the winning container.

use std::collections::HashMap;

use understory_collision::types::{contains_point, overlaps};
use understory_collision::{
    Backend, Collision, CollisionStrategy, Damage, Key, Probe, QueryOptions, Strategy,
    TargetIndex, pick_best,
};

use crate::error::GeometryError;
use crate::registry::Registry;
use crate::types::{ContainerFlags, DropTarget, SortableId};

/// Resolves a probe to at most one [`DropTarget`].
pub struct Detector<C: SortableId> {
    index: TargetIndex<C, Box<dyn Backend>>,
    keys: HashMap<C, Key>,
    strategy: Box<dyn CollisionStrategy>,
    max_distance: Option<f64>,
    item_hit_slop: f64,
}

impl<C: SortableId> core::fmt::Debug for Detector<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Detector")
            .field("index", &self.index)
            .field("max_distance", &self.max_distance)
            .field("item_hit_slop", &self.item_hit_slop)
            .finish_non_exhaustive()
    }
}

impl<C: SortableId> Detector<C> {
    /// Create a detector over an explicit index backend.
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            index: TargetIndex::with_backend(backend),
            keys: HashMap::new(),
            strategy: Box::new(Strategy::default()),
            max_distance: None,
            item_hit_slop: 0.0,
        }
    }

    /// Replace the scoring strategy.
    pub fn set_strategy(&mut self, strategy: impl CollisionStrategy + 'static) {
        self.strategy = Box::new(strategy);
    }

    /// Containers scoring above this are not candidates.
    pub fn set_max_distance(&mut self, max_distance: Option<f64>) {
        self.max_distance = max_distance;
    }

    /// Inflate item regions by this much when matching the pointer.
    pub fn set_item_hit_slop(&mut self, slop: f64) {
        self.item_hit_slop = slop;
    }

    /// Number of container regions currently indexed.
    pub fn tracked(&self) -> usize {
        self.keys.len()
    }

    /// Sync the index with the registry and commit.
    ///
    /// All container regions are read before the index is touched, so a
    /// failing provider leaves the index exactly as it was.
    pub fn refresh<I: SortableId>(
        &mut self,
        registry: &Registry<C, I>,
    ) -> Result<Damage, GeometryError> {
        let mut regions = Vec::with_capacity(registry.len());
        for c in registry.containers() {
            let Some(geometry) = registry.geometry(c) else {
                continue;
            };
            regions.push((c, geometry.bounds()?));
        }

        let stale: Vec<C> = self
            .keys
            .keys()
            .copied()
            .filter(|c| !registry.contains_container(*c))
            .collect();
        for c in stale {
            if let Some(key) = self.keys.remove(&c) {
                self.index.remove(key);
            }
        }
        for (c, bounds) in regions {
            match self.keys.get(&c) {
                Some(key) => self.index.update(*key, bounds),
                None => {
                    let key = self.index.insert(bounds, c);
                    self.keys.insert(c, key);
                }
            }
        }
        Ok(self.index.commit())
    }

    /// Best target for `item`, which currently lives in `origin`.
    ///
    /// Reads the index as of the last [`refresh`](Self::refresh).
    pub fn detect<I: SortableId>(
        &self,
        registry: &Registry<C, I>,
        origin: C,
        probe: &Probe,
    ) -> Result<Option<DropTarget<C, I>>, GeometryError> {
        let options = QueryOptions {
            max_score: self.max_distance,
        };
        let accepts = |c: &C| {
            registry.flags(*c).is_some_and(|f| {
                f.contains(ContainerFlags::DROP_TARGET)
                    && (*c == origin || f.contains(ContainerFlags::ACCEPTS_FOREIGN))
            })
        };
        let Some(hit) = self
            .index
            .best_at(probe, self.strategy.as_ref(), options, accepts)
        else {
            return Ok(None);
        };
        let container = hit.payload;
        let anchor = self.item_under(registry, container, probe)?;
        Ok(Some(DropTarget { container, anchor }))
    }

    fn item_under<I: SortableId>(
        &self,
        registry: &Registry<C, I>,
        container: C,
        probe: &Probe,
    ) -> Result<Option<I>, GeometryError> {
        let (Some(items), Some(geometry)) = (registry.items(container), registry.geometry(container))
        else {
            return Ok(None);
        };
        let region = geometry.bounds()?;
        let slop = self.item_hit_slop;
        let mut candidates = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let Some(rect) = geometry.item_bounds(item, index)? else {
                continue;
            };
            if !overlaps(&rect, &region) || !contains_point(&rect.inflate(slop, slop), probe.pointer)
            {
                continue;
            }
            let Some(score) = self.strategy.score(probe, rect) else {
                continue;
            };
            candidates.push(Collision {
                payload: *item,
                score,
                order: index as u64,
            });
        }
        Ok(pick_best(candidates).map(|c| c.payload))
    }
}
