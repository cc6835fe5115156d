// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple). Drop-target sets
//!   are usually a handful of containers, so this is the default.
//! - `grid`: uniform grid with an origin offset; useful for boards with many
//!   containers spread over a large canvas.

pub mod flatvec;
pub mod grid;

pub use flatvec::FlatVec;
pub use grid::Grid;
