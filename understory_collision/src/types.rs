// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Probe geometry and small rectangle helpers.

use kurbo::{Point, Rect, Size};

/// Geometry of the dragged item for one sample.
///
/// The pointer is always known. The dragged item's own bounds are optional:
/// callers that only track the pointer leave `rect` empty and strategies fall
/// back to the pointer position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Probe {
    /// Pointer position, in the same space as the target regions.
    pub pointer: Point,
    /// Current bounds of the dragged item, if tracked.
    pub rect: Option<Rect>,
}

impl Probe {
    /// A probe that only carries a pointer position.
    pub const fn at(pointer: Point) -> Self {
        Self {
            pointer,
            rect: None,
        }
    }

    /// Attach the dragged item's bounds.
    #[must_use]
    pub const fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Reference point used by center-based strategies.
    ///
    /// The center of the dragged rect when present, otherwise the pointer.
    pub fn reference(&self) -> Point {
        match self.rect {
            Some(r) => r.center(),
            None => self.pointer,
        }
    }

    /// The dragged rect, or a zero-size rect at the pointer.
    pub fn bounds(&self) -> Rect {
        self.rect
            .unwrap_or_else(|| Rect::from_origin_size(self.pointer, Size::ZERO))
    }
}

/// Whether `rect` contains `p`, edges included. Assumes no NaN.
///
/// Kurbo's own `Rect::contains` is half-open; hit testing here treats shared
/// edges as belonging to both neighbours and lets the strategy break the tie.
#[inline]
pub fn contains_point(rect: &Rect, p: Point) -> bool {
    rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1
}

/// Whether two rects overlap or touch, edges included.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Corners in a fixed order: top-left, top-right, bottom-left, bottom-right.
pub(crate) fn corners(r: &Rect) -> [Point; 4] {
    [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x0, r.y1),
        Point::new(r.x1, r.y1),
    ]
}

/// Intersection area over union area, in `0.0..=1.0`.
pub(crate) fn overlap_ratio(a: &Rect, b: &Rect) -> f64 {
    let inter = a.intersect(*b);
    let inter_area = inter.width().max(0.0) * inter.height().max(0.0);
    if inter_area <= 0.0 {
        return 0.0;
    }
    let union_area = a.area().abs() + b.area().abs() - inter_area;
    if union_area <= 0.0 {
        return 0.0;
    }
    inter_area / union_area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(contains_point(&r, Point::new(0.0, 0.0)));
        assert!(contains_point(&r, Point::new(10.0, 10.0)));
        assert!(!contains_point(&r, Point::new(10.5, 5.0)));
        assert!(!contains_point(&r, Point::new(f64::NAN, 5.0)));
    }

    #[test]
    fn probe_reference_prefers_rect_center() {
        let p = Probe::at(Point::new(1.0, 1.0));
        assert_eq!(p.reference(), Point::new(1.0, 1.0));
        let p = p.with_rect(Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(p.reference(), Point::new(15.0, 15.0));
    }

    #[test]
    fn overlap_ratio_bounds() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(overlap_ratio(&a, &a), 1.0);
        assert_eq!(overlap_ratio(&a, &Rect::new(20.0, 20.0, 30.0, 30.0)), 0.0);
        let half = overlap_ratio(&a, &Rect::new(5.0, 0.0, 15.0, 10.0));
        assert!((half - 1.0 / 3.0).abs() < 1e-12);
    }
}
