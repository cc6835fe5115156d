// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: identifiers, drop targets, container flags, samples, and results.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect};
use understory_collision::Probe;

/// Bounds shared by container and item identifiers.
///
/// Identifiers are small copyable keys owned by the caller (database ids,
/// interned strings, generational handles). Blanket-implemented.
pub trait SortableId: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> SortableId for T {}

/// Where a drop would land.
///
/// `anchor` is the item the pointer is directly over; `None` means the empty
/// space of the container, which inserts at the end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropTarget<C, I> {
    /// Container that would receive the item.
    pub container: C,
    /// Item the drop is anchored on, if any.
    pub anchor: Option<I>,
}

impl<C, I> DropTarget<C, I> {
    /// Target the empty space of a container.
    pub const fn container(container: C) -> Self {
        Self {
            container,
            anchor: None,
        }
    }

    /// Target a specific item within a container.
    pub const fn item(container: C, item: I) -> Self {
        Self {
            container,
            anchor: Some(item),
        }
    }
}

bitflags::bitflags! {
    /// Per-container drop behavior.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ContainerFlags: u8 {
        /// Container takes part in collision detection.
        const DROP_TARGET     = 0b0000_0001;
        /// Container accepts items dragged in from other containers.
        const ACCEPTS_FOREIGN = 0b0000_0010;
    }
}

impl Default for ContainerFlags {
    fn default() -> Self {
        Self::DROP_TARGET | Self::ACCEPTS_FOREIGN
    }
}

/// One input sample from the caller's pointer layer.
///
/// `sequence` must increase with delivery order at the source. Samples older
/// than the last accepted one are discarded.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Pointer position in layout space.
    pub pointer: Point,
    /// Current bounds of the dragged item, if the caller tracks them.
    pub active_rect: Option<Rect>,
    /// Source sequence number.
    pub sequence: u64,
}

impl Sample {
    /// A pointer-only sample.
    pub fn at(x: f64, y: f64, sequence: u64) -> Self {
        Self {
            pointer: Point::new(x, y),
            active_rect: None,
            sequence,
        }
    }

    /// Attach the dragged item's current bounds.
    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.active_rect = Some(rect);
        self
    }

    /// Collision probe for this sample.
    pub fn probe(&self) -> Probe {
        Probe {
            pointer: self.pointer,
            rect: self.active_rect,
        }
    }
}

/// Lifecycle phase of the drag state machine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No drag has started since construction or the last reset.
    #[default]
    Idle,
    /// A drag session is active and accepting samples.
    Dragging,
    /// A commit is in progress.
    Settling,
    /// The last session committed or cancelled.
    Ended,
}

/// How a drag ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DropResult<C> {
    /// The item now sits at `index` in `container`.
    Moved {
        /// Receiving container.
        container: C,
        /// Final index within the receiving container.
        index: usize,
    },
    /// The drop resolved to the item's current position.
    Noop,
    /// The drag was abandoned; nothing changed.
    Cancelled,
}

impl<C> DropResult<C> {
    /// True if the registry was mutated.
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}
