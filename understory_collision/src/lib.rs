// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collision --heading-base-level=0

//! Understory Collision: drop-target regions and collision detection.
//!
//! Understory Collision answers "which target is the dragged thing over?".
//!
//! - Insert, update, and remove target regions (Kurbo `Rect`s) with small `Copy` payloads.
//! - Batch updates with [`TargetIndex::commit`] and receive coarse [`Damage`].
//! - Score candidates with a [`CollisionStrategy`] and pick one deterministically.
//!
//! It does not know about containers, items, or drag sessions.
//! Higher layers (like `understory_sortable`) feed it container regions each frame and
//! interpret the winning payload.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_collision::{Probe, QueryOptions, Strategy, TargetIndex};
//!
//! let mut idx: TargetIndex<&str> = TargetIndex::new();
//! idx.insert(Rect::new(0.0, 0.0, 100.0, 400.0), "todo");
//! idx.insert(Rect::new(110.0, 0.0, 210.0, 400.0), "done");
//! let _damage = idx.commit();
//!
//! let probe = Probe::at(Point::new(150.0, 40.0));
//! let hit = idx
//!     .best_at(&probe, &Strategy::ClosestCenter, QueryOptions::default(), |_| true)
//!     .unwrap();
//! assert_eq!(hit.payload, "done");
//! ```
//!
//! ## Strategies
//!
//! - [`Strategy::ClosestCenter`] (default): distance from the probe's reference point
//!   (dragged rect center, or pointer) to the region center.
//! - [`Strategy::ClosestCorners`]: mean corner-to-corner distance.
//! - [`Strategy::PointerWithin`]: only regions under the pointer.
//! - [`Strategy::RectIntersection`]: overlap ratio with the dragged rect.
//!
//! Lower scores win. Equal scores resolve to the candidate inserted first, which keeps
//! results reproducible in tests and independent of backend iteration order.
//!
//! ## Choosing a backend
//!
//! - [`FlatVec`] (default): linear scans. Drop-target sets are usually small.
//! - [`Grid`]: uniform grid with an origin offset, for large boards with many targets.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs in regions. NaN scores are ignored during selection.
//! Containment is edge-inclusive.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod damage;
pub mod index;
pub mod select;
pub mod strategy;
pub mod types;

pub use backend::Backend;
pub use backends::{FlatVec, Grid};
pub use damage::Damage;
pub use index::{GridIndex, Key, QueryOptions, TargetIndex};
pub use select::{Collision, pick_best};
pub use strategy::{CollisionStrategy, Strategy};
pub use types::Probe;
