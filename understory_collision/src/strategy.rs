// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision strategies: how a candidate region is scored against a probe.
//!
//! Every strategy maps `(probe, region)` to an optional score. Lower scores are
//! nearer. `None` rejects the region outright. Selection between scored
//! candidates lives in [`pick_best`](crate::pick_best), so a custom strategy
//! only has to answer "how far".
//!
//! Closures with the signature `Fn(&Probe, Rect) -> Option<f64>` are strategies
//! too.

use kurbo::Rect;

use crate::types::{Probe, contains_point, corners, overlap_ratio};

/// Scores a candidate region against a probe.
pub trait CollisionStrategy {
    /// Score `region` against `probe`. Lower is nearer; `None` rejects it.
    fn score(&self, probe: &Probe, region: Rect) -> Option<f64>;
}

impl<F> CollisionStrategy for F
where
    F: Fn(&Probe, Rect) -> Option<f64>,
{
    fn score(&self, probe: &Probe, region: Rect) -> Option<f64> {
        self(probe, region)
    }
}

/// Built-in strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Distance between the probe's reference point and the region's center.
    #[default]
    ClosestCenter,
    /// Mean distance between corresponding corners of the probe rect and the region.
    ///
    /// Suited to tall or wide containers where centers are far from the edges
    /// the user actually aims at.
    ClosestCorners,
    /// Only regions containing the pointer; scored by distance to their center.
    PointerWithin,
    /// Regions overlapping the dragged rect, scored by `1 - overlap/union`.
    ///
    /// Falls back to [`PointerWithin`](Self::PointerWithin) when the probe
    /// carries no rect.
    RectIntersection,
}

impl CollisionStrategy for Strategy {
    fn score(&self, probe: &Probe, region: Rect) -> Option<f64> {
        match self {
            Self::ClosestCenter => Some(probe.reference().distance(region.center())),
            Self::ClosestCorners => {
                let a = corners(&probe.bounds());
                let b = corners(&region);
                let sum: f64 = a.iter().zip(b.iter()).map(|(p, q)| p.distance(*q)).sum();
                Some(sum / 4.0)
            }
            Self::PointerWithin => contains_point(&region, probe.pointer)
                .then(|| probe.pointer.distance(region.center())),
            Self::RectIntersection => match probe.rect {
                Some(r) => {
                    let ratio = overlap_ratio(&r, &region);
                    (ratio > 0.0).then_some(1.0 - ratio)
                }
                None => Self::PointerWithin.score(probe, region),
            },
        }
    }
}
