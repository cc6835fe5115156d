// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session state machine.
//!
//! ```text
//!  Idle ──begin──▶ Dragging ──settle──▶ Settling ──settled──▶ Ended
//!   ▲                 │                                        │
//!   │                 └────────────────cancel──────────────────▶│
//!   └───────────────────────reset (from any phase)──────────────┘
//! ```
//!
//! `Ended` behaves like `Idle` for [`DragMachine::begin`]; the distinction
//! only tells callers whether a drag has happened since the last reset.

use understory_collision::Probe;

use crate::error::{Result, SortableError};
use crate::registry::Snapshot;
use crate::types::{DragPhase, DropTarget, SortableId};

/// State of one in-progress drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<C, I> {
    /// Dragged item.
    pub item: I,
    /// Container the item was in when the drag began.
    pub origin: C,
    /// Index of the item in `origin` when the drag began.
    pub origin_index: usize,
    /// Last accepted probe.
    pub probe: Option<Probe>,
    /// Current best target.
    pub target: Option<DropTarget<C, I>>,
    /// Sequence number of the last accepted sample.
    pub sequence: Option<u64>,
    /// Registry state when the drag began.
    pub snapshot: Snapshot<C, I>,
    /// [`Registry::revision`](crate::Registry::revision) when the drag began.
    pub revision: u64,
}

impl<C, I> DragSession<C, I> {
    /// A fresh session with no samples yet.
    pub fn new(
        item: I,
        origin: C,
        origin_index: usize,
        snapshot: Snapshot<C, I>,
        revision: u64,
    ) -> Self {
        Self {
            item,
            origin,
            origin_index,
            probe: None,
            target: None,
            sequence: None,
            snapshot,
            revision,
        }
    }

    /// Whether a sample with this sequence is older than the last accepted one.
    ///
    /// Equal sequence numbers are accepted: a source may resend its latest sample.
    pub fn is_stale(&self, sequence: u64) -> bool {
        self.sequence.is_some_and(|last| sequence < last)
    }

    /// Record an accepted sample.
    ///
    /// Returns the previous target.
    pub fn record(
        &mut self,
        sequence: u64,
        probe: Probe,
        target: Option<DropTarget<C, I>>,
    ) -> Option<DropTarget<C, I>> {
        self.sequence = Some(sequence);
        self.probe = Some(probe);
        core::mem::replace(&mut self.target, target)
    }
}

/// Phase plus the optional active session.
#[derive(Clone, Debug)]
pub struct DragMachine<C, I> {
    phase: DragPhase,
    session: Option<DragSession<C, I>>,
}

impl<C, I> Default for DragMachine<C, I> {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
            session: None,
        }
    }
}

impl<C: SortableId, I: SortableId> DragMachine<C, I> {
    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// The active session, while dragging.
    pub fn session(&self) -> Option<&DragSession<C, I>> {
        self.session.as_ref()
    }

    /// Mutable access to the active session.
    pub fn session_mut(&mut self) -> Result<&mut DragSession<C, I>, C, I> {
        self.session.as_mut().ok_or(SortableError::NotDragging)
    }

    /// `Idle | Ended → Dragging`.
    pub fn begin(&mut self, session: DragSession<C, I>) -> Result<(), C, I> {
        if let Some(active) = &self.session {
            return Err(SortableError::DragAlreadyActive(active.item));
        }
        self.session = Some(session);
        self.phase = DragPhase::Dragging;
        Ok(())
    }

    /// `Dragging → Settling`, handing the session to the commit.
    pub fn settle(&mut self) -> Result<DragSession<C, I>, C, I> {
        let session = self.session.take().ok_or(SortableError::NotDragging)?;
        self.phase = DragPhase::Settling;
        Ok(session)
    }

    /// `Settling → Ended`.
    pub fn settled(&mut self) {
        debug_assert_eq!(self.phase, DragPhase::Settling);
        self.phase = DragPhase::Ended;
    }

    /// `Dragging → Ended` without a commit.
    pub fn cancel(&mut self) -> Result<DragSession<C, I>, C, I> {
        let session = self.session.take().ok_or(SortableError::NotDragging)?;
        self.phase = DragPhase::Ended;
        Ok(session)
    }

    /// Any phase `→ Idle`, dropping the session.
    pub fn reset(&mut self) -> Option<DragSession<C, I>> {
        self.phase = DragPhase::Idle;
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn session(item: u32) -> DragSession<char, u32> {
        DragSession::new(item, 'A', 0, Snapshot::default(), 0)
    }

    #[test]
    fn full_lifecycle() {
        let mut m: DragMachine<char, u32> = DragMachine::default();
        assert_eq!(m.phase(), DragPhase::Idle);
        m.begin(session(1)).unwrap();
        assert_eq!(m.phase(), DragPhase::Dragging);
        let s = m.settle().unwrap();
        assert_eq!(s.item, 1);
        assert_eq!(m.phase(), DragPhase::Settling);
        m.settled();
        assert_eq!(m.phase(), DragPhase::Ended);
        m.begin(session(2)).unwrap();
        assert_eq!(m.session().map(|s| s.item), Some(2));
    }

    #[test]
    fn second_begin_is_rejected() {
        let mut m: DragMachine<char, u32> = DragMachine::default();
        m.begin(session(1)).unwrap();
        assert_eq!(
            m.begin(session(2)),
            Err(SortableError::DragAlreadyActive(1))
        );
        assert_eq!(m.session().map(|s| s.item), Some(1));
    }

    #[test]
    fn transitions_without_a_session_fail() {
        let mut m: DragMachine<char, u32> = DragMachine::default();
        assert_eq!(m.settle(), Err(SortableError::NotDragging));
        assert_eq!(m.cancel(), Err(SortableError::NotDragging));
        assert!(m.session_mut().is_err());
        assert_eq!(m.phase(), DragPhase::Idle);
    }

    #[test]
    fn reset_returns_to_idle_from_anywhere() {
        let mut m: DragMachine<char, u32> = DragMachine::default();
        m.begin(session(1)).unwrap();
        assert!(m.reset().is_some());
        assert_eq!(m.phase(), DragPhase::Idle);
        m.begin(session(1)).unwrap();
        m.cancel().unwrap();
        assert!(m.reset().is_none());
        assert_eq!(m.phase(), DragPhase::Idle);
    }

    #[test]
    fn stale_samples_are_strictly_older() {
        let mut s = session(1);
        assert!(!s.is_stale(0));
        let probe = Probe::at(Point::new(1.0, 1.0));
        assert_eq!(s.record(5, probe, Some(DropTarget::container('A'))), None);
        assert!(s.is_stale(4));
        assert!(!s.is_stale(5));
        assert!(!s.is_stale(6));
        assert_eq!(
            s.record(6, probe, None),
            Some(DropTarget::container('A'))
        );
    }
}
