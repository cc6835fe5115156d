// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic best-candidate selection.

/// A scored candidate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collision<P> {
    /// Caller payload identifying the candidate.
    pub payload: P,
    /// Strategy score; lower is nearer.
    pub score: f64,
    /// Tie-break rank; lower wins (registration or sequence order).
    pub order: u64,
}

/// Pick the candidate with the lowest score.
///
/// Equal scores fall back to the lowest `order`, so the first registered
/// candidate wins regardless of iteration order. NaN scores are ignored.
/// Single pass, no allocation.
pub fn pick_best<P>(candidates: impl IntoIterator<Item = Collision<P>>) -> Option<Collision<P>> {
    let mut best: Option<Collision<P>> = None;
    for c in candidates {
        if c.score.is_nan() {
            continue;
        }
        let better = match &best {
            None => true,
            Some(b) => c.score < b.score || (c.score == b.score && c.order < b.order),
        };
        if better {
            best = Some(c);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn c(payload: u32, score: f64, order: u64) -> Collision<u32> {
        Collision {
            payload,
            score,
            order,
        }
    }

    #[test]
    fn lowest_score_wins() {
        let best = pick_best(vec![c(1, 3.0, 0), c(2, 1.0, 1), c(3, 2.0, 2)]).unwrap();
        assert_eq!(best.payload, 2);
    }

    #[test]
    fn ties_go_to_first_registered_in_any_order() {
        let fwd = pick_best(vec![c(1, 1.0, 4), c(2, 1.0, 2)]).unwrap();
        let rev = pick_best(vec![c(2, 1.0, 2), c(1, 1.0, 4)]).unwrap();
        assert_eq!(fwd.payload, 2);
        assert_eq!(rev.payload, 2);
    }

    #[test]
    fn nan_is_skipped_and_empty_is_none() {
        assert!(pick_best::<u32>(vec![]).is_none());
        let best = pick_best(vec![c(1, f64::NAN, 0), c(2, 9.0, 1)]).unwrap();
        assert_eq!(best.payload, 2);
    }
}
