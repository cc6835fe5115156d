// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sortable --heading-base-level=0

//! Understory Sortable: deterministic multi-container drag-and-drop reordering.
//!
//! ## Overview
//!
//! This crate decides where a dragged item lands. It tracks one in-progress
//! drag, resolves which container and position the item is over, and reorders
//! the containers' item sequences when the drag is committed.
//! It does not render, read input devices, or animate.
//! Callers feed it pointer samples and react to the events it returns.
//!
//! - [`Registry`]: containers, their ordered items, and an item → container index.
//! - [`Detector`]: container and item collision via `understory_collision`.
//! - [`DragMachine`]: the `Idle → Dragging → Settling → Ended` state machine.
//! - [`reorder::plan`]: pure computation of the move a drop implies.
//! - [`events`]: `DragStart`, `DragOver`, `DragEnd`, queued and observable.
//!
//! [`Sortable`] bundles them behind one `&mut self` API.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_sortable::{DropResult, ListLayout, Sample, Sortable};
//!
//! let mut board: Sortable<&str, u32> = Sortable::new();
//! let todo = ListLayout::vertical(Rect::new(0.0, 0.0, 100.0, 300.0), 50.0);
//! let done = ListLayout::vertical(Rect::new(120.0, 0.0, 220.0, 300.0), 50.0);
//! board.register_container("todo", [1, 2, 3], todo).unwrap();
//! board.register_container("done", [4], done).unwrap();
//!
//! board.begin_drag(2).unwrap();
//! // Over the empty space of "done".
//! board.sample(Sample::at(170.0, 200.0, 1)).unwrap();
//! let end = board.commit().unwrap();
//!
//! assert_eq!(end.result, DropResult::Moved { container: "done", index: 1 });
//! assert_eq!(board.items("todo"), Some(&[1, 3][..]));
//! assert_eq!(board.items("done"), Some(&[4, 2][..]));
//! ```
//!
//! ## Outcomes
//!
//! Commit always ends the drag, with one of:
//! - `Moved { container, index }`: the item's final position.
//! - `Noop`: dropped onto itself or onto its current position.
//! - `Cancelled`: no target, or the target or item vanished mid-drag.
//!
//! Only caller mistakes (unknown ids, a second concurrent drag, committing
//! without a drag) are [`SortableError`]s, and those never mutate anything.
//!
//! ## Ordering of samples
//!
//! Every [`Sample`] carries a sequence number. Samples older than the last
//! accepted one are discarded, so out-of-order delivery resolves to the latest
//! position without locks.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`SortableConfig`], [`Snapshot`],
//!   [`DropTarget`] and [`DropResult`].

pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod registry;
pub mod reorder;
pub mod session;
pub mod types;

pub use collision::Detector;
pub use config::{IndexBackend, SortableConfig};
pub use engine::{SampleOutcome, Sortable};
pub use error::{ConfigError, GeometryError, SortableError};
pub use events::{
    DragEnd, DragEvent, DragObserver, DragOver, DragStart, OverTransition, TargetNode,
};
pub use geometry::{ContainerGeometry, FixedLayout, ListLayout, SortStrategy};
pub use registry::{Move, Registry, Snapshot};
pub use reorder::{CancelReason, Plan};
pub use session::{DragMachine, DragSession};
pub use types::{ContainerFlags, DragPhase, DropResult, DropTarget, Sample, SortableId};

pub use understory_collision::{CollisionStrategy, Strategy};
