// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use kurbo::{Point, Size};
use understory_collision::{Backend, FlatVec, Grid, Strategy};

use crate::error::ConfigError;

/// Spatial backend used for container regions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndexBackend {
    /// Linear scan over all containers.
    #[default]
    Flat,
    /// Uniform grid, for boards with many containers.
    Grid {
        /// Cell width.
        cell_width: f64,
        /// Cell height.
        cell_height: f64,
        /// X of the grid origin.
        #[cfg_attr(feature = "serde", serde(default))]
        origin_x: f64,
        /// Y of the grid origin.
        #[cfg_attr(feature = "serde", serde(default))]
        origin_y: f64,
    },
}

impl IndexBackend {
    /// A grid backend with square cells at the origin.
    pub fn grid(cell: f64) -> Self {
        Self::Grid {
            cell_width: cell,
            cell_height: cell,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    /// Check that the backend can be built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self::Grid {
            cell_width,
            cell_height,
            origin_x,
            origin_y,
        } = *self
        else {
            return Ok(());
        };
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(cell_width) || !positive(cell_height) {
            return Err(ConfigError::InvalidGridCell {
                width: cell_width,
                height: cell_height,
            });
        }
        if !origin_x.is_finite() || !origin_y.is_finite() {
            return Err(ConfigError::InvalidGridOrigin {
                x: origin_x,
                y: origin_y,
            });
        }
        Ok(())
    }

    /// Instantiate the backend.
    ///
    /// Fails for a grid whose cell is zero, negative or non-finite.
    pub fn build(&self) -> Result<Box<dyn Backend>, ConfigError> {
        self.validate()?;
        Ok(match *self {
            Self::Flat => Box::new(FlatVec::default()),
            Self::Grid {
                cell_width,
                cell_height,
                origin_x,
                origin_y,
            } => Box::new(Grid::new(
                Size::new(cell_width, cell_height),
                Point::new(origin_x, origin_y),
            )),
        })
    }
}

/// Configuration for [`Sortable`](crate::Sortable).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SortableConfig {
    /// How container and item regions are scored.
    pub strategy: Strategy,
    /// Containers scoring above this are ignored.
    pub max_distance: Option<f64>,
    /// Extra reach around item regions.
    pub item_hit_slop: f64,
    /// Container index backend.
    pub backend: IndexBackend,
    /// Queue events for [`drain_events`](crate::Sortable::drain_events).
    pub record_events: bool,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::ClosestCenter,
            max_distance: None,
            item_hit_slop: 0.0,
            backend: IndexBackend::Flat,
            record_events: true,
        }
    }
}

impl SortableConfig {
    /// Check every field an engine depends on.
    ///
    /// [`Sortable::with_config`](crate::Sortable::with_config) calls this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.item_hit_slop.is_finite() && self.item_hit_slop >= 0.0) {
            return Err(ConfigError::InvalidHitSlop(self.item_hit_slop));
        }
        if self.max_distance.is_some_and(f64::is_nan) {
            return Err(ConfigError::InvalidMaxDistance);
        }
        self.backend.validate()
    }

    /// Set the collision strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the container score cutoff.
    #[must_use]
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Set the item hit slop.
    #[must_use]
    pub fn with_item_hit_slop(mut self, slop: f64) -> Self {
        self.item_hit_slop = slop;
        self
    }

    /// Set the index backend.
    #[must_use]
    pub fn with_backend(mut self, backend: IndexBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Enable or disable the event queue.
    #[must_use]
    pub fn with_record_events(mut self, record: bool) -> Self {
        self.record_events = record;
        self
    }
}
