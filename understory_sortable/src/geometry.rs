// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry providers: where a container and its items are on screen.
//!
//! The engine never lays anything out. Each registered container carries a
//! [`ContainerGeometry`] that reports its own region and the regions of its
//! items, in one shared layout space. Providers are queried on every accepted
//! sample, so they should reflect the caller's current layout.
//!
//! [`ListLayout`] covers the common case of uniformly sized items stacked
//! according to a [`SortStrategy`]. [`FixedLayout`] holds explicit rectangles
//! for free-form arrangements.

use std::collections::HashMap;
use std::hash::Hash;

use kurbo::{Rect, Size};

use crate::error::GeometryError;

/// Supplies the regions of one container and its items.
pub trait ContainerGeometry<I> {
    /// Region of the container itself.
    fn bounds(&self) -> Result<Rect, GeometryError>;

    /// Region of `item`, currently at `index` in the container.
    ///
    /// `Ok(None)` means the item is not laid out (e.g. virtualized away) and
    /// cannot be hovered.
    fn item_bounds(&self, item: &I, index: usize) -> Result<Option<Rect>, GeometryError>;
}

/// How items are arranged inside a [`ListLayout`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortStrategy {
    /// Top to bottom; items span the container width.
    #[default]
    VerticalList,
    /// Left to right; items span the container height.
    HorizontalList,
    /// Row-major grid with a fixed column count.
    Grid {
        /// Items per row (treated as at least 1).
        columns: u32,
    },
}

/// Uniformly sized items laid out by a [`SortStrategy`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ListLayout {
    /// Container region.
    pub bounds: Rect,
    /// Arrangement of items.
    pub strategy: SortStrategy,
    /// Item size. Lists only use the extent along their axis.
    pub item_size: Size,
    /// Spacing between neighbouring items.
    pub gap: f64,
}

impl ListLayout {
    /// A vertical list of rows `row_height` tall.
    pub fn vertical(bounds: Rect, row_height: f64) -> Self {
        Self {
            bounds,
            strategy: SortStrategy::VerticalList,
            item_size: Size::new(bounds.width(), row_height),
            gap: 0.0,
        }
    }

    /// A horizontal list of columns `column_width` wide.
    pub fn horizontal(bounds: Rect, column_width: f64) -> Self {
        Self {
            bounds,
            strategy: SortStrategy::HorizontalList,
            item_size: Size::new(column_width, bounds.height()),
            gap: 0.0,
        }
    }

    /// A grid of `columns` cells per row.
    pub fn grid(bounds: Rect, columns: u32, cell: Size) -> Self {
        Self {
            bounds,
            strategy: SortStrategy::Grid { columns },
            item_size: cell,
            gap: 0.0,
        }
    }

    /// Set the spacing between items.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Region of the item at `index`.
    ///
    /// Slots past the end of the container region are still reported; the
    /// detector ignores items outside the container.
    #[allow(
        clippy::cast_precision_loss,
        reason = "Item indices stay far below 2^52."
    )]
    pub fn slot(&self, index: usize) -> Rect {
        let Size { width, height } = self.item_size;
        let b = self.bounds;
        match self.strategy {
            SortStrategy::VerticalList => {
                let y0 = b.y0 + index as f64 * (height + self.gap);
                Rect::new(b.x0, y0, b.x1, y0 + height)
            }
            SortStrategy::HorizontalList => {
                let x0 = b.x0 + index as f64 * (width + self.gap);
                Rect::new(x0, b.y0, x0 + width, b.y1)
            }
            SortStrategy::Grid { columns } => {
                let columns = columns.max(1) as usize;
                let (row, col) = (index / columns, index % columns);
                let x0 = b.x0 + col as f64 * (width + self.gap);
                let y0 = b.y0 + row as f64 * (height + self.gap);
                Rect::new(x0, y0, x0 + width, y0 + height)
            }
        }
    }
}

impl<I> ContainerGeometry<I> for ListLayout {
    fn bounds(&self) -> Result<Rect, GeometryError> {
        Ok(self.bounds)
    }

    fn item_bounds(&self, _item: &I, index: usize) -> Result<Option<Rect>, GeometryError> {
        Ok(Some(self.slot(index)))
    }
}

/// Explicit rectangles per item, for free-form arrangements.
///
/// Items without a rectangle are treated as not laid out.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayout<I: Eq + Hash> {
    bounds: Rect,
    items: HashMap<I, Rect>,
}

impl<I: Eq + Hash> FixedLayout<I> {
    /// A layout with a container region and no items.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            items: HashMap::new(),
        }
    }

    /// Builder-style [`set_item`](Self::set_item).
    #[must_use]
    pub fn with_item(mut self, item: I, rect: Rect) -> Self {
        self.set_item(item, rect);
        self
    }

    /// Set (or replace) the region of an item.
    pub fn set_item(&mut self, item: I, rect: Rect) {
        self.items.insert(item, rect);
    }

    /// Forget an item's region.
    pub fn clear_item(&mut self, item: &I) {
        self.items.remove(item);
    }
}

impl<I: Eq + Hash> ContainerGeometry<I> for FixedLayout<I> {
    fn bounds(&self) -> Result<Rect, GeometryError> {
        Ok(self.bounds)
    }

    fn item_bounds(&self, item: &I, _index: usize) -> Result<Option<Rect>, GeometryError> {
        Ok(self.items.get(item).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_rows_stack_with_gap() {
        let l = ListLayout::vertical(Rect::new(0.0, 0.0, 100.0, 400.0), 40.0).with_gap(10.0);
        assert_eq!(l.slot(0), Rect::new(0.0, 0.0, 100.0, 40.0));
        assert_eq!(l.slot(2), Rect::new(0.0, 100.0, 100.0, 140.0));
    }

    #[test]
    fn horizontal_columns_span_height() {
        let l = ListLayout::horizontal(Rect::new(10.0, 10.0, 500.0, 50.0), 60.0);
        assert_eq!(l.slot(1), Rect::new(70.0, 10.0, 130.0, 50.0));
    }

    #[test]
    fn grid_is_row_major() {
        let l = ListLayout::grid(Rect::new(0.0, 0.0, 300.0, 300.0), 3, Size::new(100.0, 50.0));
        assert_eq!(l.slot(4), Rect::new(100.0, 50.0, 200.0, 100.0));
        let degenerate =
            ListLayout::grid(Rect::new(0.0, 0.0, 300.0, 300.0), 0, Size::new(10.0, 10.0));
        assert_eq!(degenerate.slot(2), Rect::new(0.0, 20.0, 10.0, 30.0));
    }

    #[test]
    fn fixed_layout_reports_missing_items_as_unlaid() {
        let l = FixedLayout::new(Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_item(1_u32, Rect::new(0.0, 0.0, 5.0, 5.0));
        assert_eq!(l.item_bounds(&1, 0), Ok(Some(Rect::new(0.0, 0.0, 5.0, 5.0))));
        assert_eq!(l.item_bounds(&2, 1), Ok(None));
    }
}
