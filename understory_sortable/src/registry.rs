// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container registry: the single source of truth for "where is everything".
//!
//! ## Overview
//!
//! The registry owns, per container, an ordered sequence of item ids plus the
//! container's geometry provider and flags. Alongside the sequences it keeps a
//! reverse index from item id to owning container, maintained on every
//! mutation, so [`Registry::find_container_of`] never scans.
//!
//! ## Invariants
//!
//! - Every item id appears in exactly one container's sequence.
//! - No sequence contains duplicates.
//! - The reverse index agrees with the sequences.
//!
//! Every mutating method validates before it touches anything; a returned
//! error means nothing changed. [`Registry::check_invariants`] verifies the
//! invariants and is used by tests and debug assertions.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, SortableError};
use crate::geometry::ContainerGeometry;
use crate::types::{ContainerFlags, SortableId};

/// A move of one item, in post-removal coordinates.
///
/// `to_index` is the final index of the item in `to` once the move is applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move<C, I> {
    /// Item being moved.
    pub item: I,
    /// Container the item currently sits in.
    pub from: C,
    /// Current index of the item in `from`.
    pub from_index: usize,
    /// Receiving container (may equal `from`).
    pub to: C,
    /// Final index in `to`.
    pub to_index: usize,
}

/// Immutable copy of all container sequences, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<C, I> {
    containers: Vec<(C, Vec<I>)>,
}

impl<C: PartialEq, I> Snapshot<C, I> {
    /// Items of `container` at the time of the snapshot.
    pub fn items(&self, container: C) -> Option<&[I]> {
        self.containers
            .iter()
            .find(|(c, _)| *c == container)
            .map(|(_, items)| items.as_slice())
    }

    /// Containers and their items, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&C, &[I])> + '_ {
        self.containers.iter().map(|(c, items)| (c, items.as_slice()))
    }

    /// Number of containers.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// True if no containers were registered.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

struct Container<I> {
    items: Vec<I>,
    geometry: Box<dyn ContainerGeometry<I>>,
    flags: ContainerFlags,
}

/// Authoritative container → ordered items state.
pub struct Registry<C, I> {
    containers: HashMap<C, Container<I>>,
    order: Vec<C>,
    owner: HashMap<I, C>,
    revision: u64,
}

impl<C: SortableId, I: SortableId> core::fmt::Debug for Registry<C, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("containers", &self.order)
            .field("items", &self.owner.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<C: SortableId, I: SortableId> Default for Registry<C, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SortableId, I: SortableId> Registry<C, I> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            containers: HashMap::new(),
            order: Vec::new(),
            owner: HashMap::new(),
            revision: 0,
        }
    }

    /// Counter bumped by every change to container membership or order.
    ///
    /// Geometry and flag changes do not count. Equal revisions mean equal
    /// [snapshots](Self::snapshot).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a container with its initial items and geometry.
    ///
    /// Fails with [`SortableError::DuplicateContainer`] if the id exists, or
    /// [`SortableError::DuplicateItem`] if an item is already owned or listed
    /// twice.
    pub fn register_container(
        &mut self,
        id: C,
        items: impl IntoIterator<Item = I>,
        geometry: impl ContainerGeometry<I> + 'static,
    ) -> Result<(), C, I> {
        if self.containers.contains_key(&id) {
            return Err(SortableError::DuplicateContainer(id));
        }
        let items: Vec<I> = items.into_iter().collect();
        let mut seen = HashSet::with_capacity(items.len());
        for &item in &items {
            if self.owner.contains_key(&item) || !seen.insert(item) {
                return Err(SortableError::DuplicateItem(item));
            }
        }
        for &item in &items {
            self.owner.insert(item, id);
        }
        self.containers.insert(
            id,
            Container {
                items,
                geometry: Box::new(geometry),
                flags: ContainerFlags::default(),
            },
        );
        self.order.push(id);
        self.revision += 1;
        Ok(())
    }

    /// Unregister a container, returning the items it still listed.
    ///
    /// Those items leave the registry entirely; move them first if they should
    /// survive.
    pub fn unregister_container(&mut self, id: C) -> Result<Vec<I>, C, I> {
        let container = self
            .containers
            .remove(&id)
            .ok_or(SortableError::UnknownContainer(id))?;
        self.order.retain(|c| *c != id);
        for item in &container.items {
            self.owner.remove(item);
        }
        self.revision += 1;
        Ok(container.items)
    }

    /// Container owning `item`, in O(1).
    pub fn find_container_of(&self, item: I) -> Option<C> {
        self.owner.get(&item).copied()
    }

    /// Owning container and index of `item`.
    pub fn position_of(&self, item: I) -> Option<(C, usize)> {
        let c = self.find_container_of(item)?;
        let idx = self.items(c)?.iter().position(|x| *x == item)?;
        Some((c, idx))
    }

    /// Items of a container, in order.
    pub fn items(&self, container: C) -> Option<&[I]> {
        self.containers.get(&container).map(|c| c.items.as_slice())
    }

    /// Whether a container is registered.
    pub fn contains_container(&self, container: C) -> bool {
        self.containers.contains_key(&container)
    }

    /// Registered containers, in registration order.
    pub fn containers(&self) -> impl Iterator<Item = C> + '_ {
        self.order.iter().copied()
    }

    /// Number of registered containers.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if no containers are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of items across all containers.
    pub fn item_count(&self) -> usize {
        self.owner.len()
    }

    /// Geometry provider of a container.
    pub fn geometry(&self, container: C) -> Option<&dyn ContainerGeometry<I>> {
        self.containers.get(&container).map(|c| c.geometry.as_ref())
    }

    /// Replace the geometry provider of a container.
    pub fn set_geometry(
        &mut self,
        container: C,
        geometry: impl ContainerGeometry<I> + 'static,
    ) -> Result<(), C, I> {
        let c = self.container_mut(container)?;
        c.geometry = Box::new(geometry);
        Ok(())
    }

    /// Flags of a container.
    pub fn flags(&self, container: C) -> Option<ContainerFlags> {
        self.containers.get(&container).map(|c| c.flags)
    }

    /// Replace the flags of a container.
    pub fn set_flags(&mut self, container: C, flags: ContainerFlags) -> Result<(), C, I> {
        self.container_mut(container)?.flags = flags;
        Ok(())
    }

    /// Insert a new item at `index` (`index == len` appends).
    pub fn insert_item(&mut self, container: C, item: I, index: usize) -> Result<(), C, I> {
        if self.owner.contains_key(&item) {
            return Err(SortableError::DuplicateItem(item));
        }
        let c = self.container_mut(container)?;
        let len = c.items.len();
        if index > len {
            return Err(SortableError::IndexOutOfBounds {
                container,
                index,
                len,
            });
        }
        c.items.insert(index, item);
        self.owner.insert(item, container);
        self.revision += 1;
        Ok(())
    }

    /// Remove an item, returning where it was.
    pub fn remove_item(&mut self, item: I) -> Result<(C, usize), C, I> {
        let (container, index) = self
            .position_of(item)
            .ok_or(SortableError::ItemNotFound(item))?;
        self.container_mut(container)?.items.remove(index);
        self.owner.remove(&item);
        self.revision += 1;
        Ok((container, index))
    }

    /// Copy all sequences, in registration order.
    pub fn snapshot(&self) -> Snapshot<C, I> {
        Snapshot {
            containers: self
                .order
                .iter()
                .filter_map(|c| self.containers.get(c).map(|e| (*c, e.items.clone())))
                .collect(),
        }
    }

    /// Apply a move atomically.
    ///
    /// The move is validated against the current state first: `item` must sit
    /// at `from_index` in `from`, `to` must exist, and `to_index` must be a
    /// valid post-removal insertion index. On error nothing changed.
    pub fn apply(&mut self, mv: &Move<C, I>) -> Result<(), C, I> {
        let from = self
            .containers
            .get(&mv.from)
            .ok_or(SortableError::UnknownContainer(mv.from))?;
        if from.items.get(mv.from_index) != Some(&mv.item) {
            return Err(SortableError::ItemNotFound(mv.item));
        }
        let to_len = if mv.from == mv.to {
            from.items.len() - 1
        } else {
            self.containers
                .get(&mv.to)
                .ok_or(SortableError::UnknownContainer(mv.to))?
                .items
                .len()
        };
        if mv.to_index > to_len {
            return Err(SortableError::IndexOutOfBounds {
                container: mv.to,
                index: mv.to_index,
                len: to_len,
            });
        }

        // Validated; from here on nothing can fail.
        self.container_mut(mv.from)?.items.remove(mv.from_index);
        self.container_mut(mv.to)?.items.insert(mv.to_index, mv.item);
        self.owner.insert(mv.item, mv.to);
        self.revision += 1;
        Ok(())
    }

    /// Check the membership invariants. Linear in the number of items.
    pub fn check_invariants(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.owner.len());
        for c in &self.order {
            let Some(entry) = self.containers.get(c) else {
                return false;
            };
            for item in &entry.items {
                if !seen.insert(*item) || self.owner.get(item) != Some(c) {
                    return false;
                }
            }
        }
        seen.len() == self.owner.len() && self.order.len() == self.containers.len()
    }

    fn container_mut(&mut self, container: C) -> Result<&mut Container<I>, C, I> {
        self.containers
            .get_mut(&container)
            .ok_or(SortableError::UnknownContainer(container))
    }
}
