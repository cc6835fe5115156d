// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Only caller mistakes are errors. Runtime outcomes such as "dropped outside
//! every container" or "dropped onto itself" are reported through
//! [`DropResult`](crate::types::DropResult) instead.

use thiserror::Error;

/// Failure reported by a [`ContainerGeometry`](crate::geometry::ContainerGeometry) provider.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// The container has not been laid out yet.
    #[error("container is not laid out")]
    NotLaidOut,
    /// Provider-specific failure.
    #[error("geometry provider failed: {0}")]
    Provider(String),
}

/// Errors returned by the registry and the engine.
///
/// Usage errors never mutate state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SortableError<C, I> {
    /// A container with this id is already registered.
    #[error("container {0:?} is already registered")]
    DuplicateContainer(C),
    /// No container with this id is registered.
    #[error("container {0:?} is not registered")]
    UnknownContainer(C),
    /// The item already belongs to a container (or is listed twice).
    #[error("item {0:?} already belongs to a container")]
    DuplicateItem(I),
    /// The item is not in any container.
    #[error("item {0:?} is not in any container")]
    ItemNotFound(I),
    /// A drag session is already active.
    #[error("a drag of item {0:?} is already active")]
    DragAlreadyActive(I),
    /// The operation requires an active drag session.
    #[error("no drag is active")]
    NotDragging,
    /// An insertion index past the end of a container.
    #[error("index {index} is out of bounds for container {container:?} of length {len}")]
    IndexOutOfBounds {
        /// Container being addressed.
        container: C,
        /// Requested index.
        index: usize,
        /// Current length of the container.
        len: usize,
    },
    /// A geometry provider failed during a sample.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// A [`SortableConfig`](crate::config::SortableConfig) that cannot drive an engine.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Grid cells must have a finite, positive size.
    #[error("grid cells must be finite and positive, got {width}x{height}")]
    InvalidGridCell {
        /// Requested cell width.
        width: f64,
        /// Requested cell height.
        height: f64,
    },
    /// The grid origin must be finite.
    #[error("grid origin must be finite, got ({x}, {y})")]
    InvalidGridOrigin {
        /// Requested origin x.
        x: f64,
        /// Requested origin y.
        y: f64,
    },
    /// Item hit slop must be finite and non-negative.
    #[error("item hit slop must be finite and non-negative, got {0}")]
    InvalidHitSlop(f64),
    /// A distance cutoff must not be NaN.
    #[error("max distance must not be NaN")]
    InvalidMaxDistance,
}

/// Result alias used across the crate.
pub type Result<T, C, I> = core::result::Result<T, SortableError<C, I>>;
