// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag lifecycle events and the emitter that delivers them.
//!
//! Every engine transition returns its event directly. The same event is also
//! appended to a queue (see [`Sortable::drain_events`](crate::Sortable::drain_events))
//! and forwarded to an optional [`DragObserver`], so callers can pick whichever
//! delivery style suits their render loop.
//!
//! ## Over transitions
//!
//! [`OverState`] turns target changes into enter/leave transitions over the
//! path `container → anchor item`:
//!
//! ```
//! use understory_sortable::events::{OverState, OverTransition, TargetNode};
//! use understory_sortable::DropTarget;
//!
//! let mut over: OverState<char, u32> = OverState::new();
//! assert_eq!(
//!     over.update(Some(DropTarget::item('A', 1))),
//!     vec![
//!         OverTransition::Enter(TargetNode::Container('A')),
//!         OverTransition::Enter(TargetNode::Item(1)),
//!     ]
//! );
//! // Moving onto the container's empty space only leaves the item.
//! assert_eq!(
//!     over.update(Some(DropTarget::container('A'))),
//!     vec![OverTransition::Leave(TargetNode::Item(1))]
//! );
//! ```

use crate::types::{DropResult, DropTarget};

/// A drag began.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DragStart<C, I> {
    /// Dragged item.
    pub item: I,
    /// Container the item started in.
    pub origin_container: C,
    /// Index the item started at.
    pub origin_index: usize,
}

/// The best drop target changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragOver<C, I> {
    /// Dragged item.
    pub item: I,
    /// New target; `None` when the item left every container.
    pub target: Option<DropTarget<C, I>>,
    /// Target before this change.
    pub previous: Option<DropTarget<C, I>>,
    /// Leaves (inner to outer), then enters (outer to inner).
    pub transitions: Vec<OverTransition<TargetNode<C, I>>>,
}

/// A drag finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragEnd<C, I> {
    /// Dragged item.
    pub item: I,
    /// What happened to it.
    pub result: DropResult<C>,
    /// Leave transitions for whatever the pointer was still over, innermost first.
    pub transitions: Vec<OverTransition<TargetNode<C, I>>>,
}

/// Any drag event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragEvent<C, I> {
    /// See [`DragStart`].
    Start(DragStart<C, I>),
    /// See [`DragOver`].
    Over(DragOver<C, I>),
    /// See [`DragEnd`].
    End(DragEnd<C, I>),
}

/// Receives events as they are emitted.
pub trait DragObserver<C, I> {
    /// Called once per event, after the engine's state is updated.
    fn on_event(&mut self, event: &DragEvent<C, I>);
}

impl<C, I, F> DragObserver<C, I> for F
where
    F: FnMut(&DragEvent<C, I>),
{
    fn on_event(&mut self, event: &DragEvent<C, I>) {
        self(event);
    }
}

/// A node on the hovered path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetNode<C, I> {
    /// A container region.
    Container(C),
    /// An anchor item inside the container above it on the path.
    Item(I),
}

/// An over transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverTransition<K> {
    /// The dragged item entered the node.
    Enter(K),
    /// The dragged item left the node.
    Leave(K),
}

/// Tracks the hovered `container → item` path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverState<C, I> {
    current: Vec<TargetNode<C, I>>,
}

impl<C, I> Default for OverState<C, I> {
    fn default() -> Self {
        Self {
            current: Vec::new(),
        }
    }
}

impl<C: Copy + Eq, I: Copy + Eq> OverState<C, I> {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current path, outermost first.
    pub fn current_path(&self) -> &[TargetNode<C, I>] {
        &self.current
    }

    /// Move to `target` and return the transitions.
    pub fn update(
        &mut self,
        target: Option<DropTarget<C, I>>,
    ) -> Vec<OverTransition<TargetNode<C, I>>> {
        let mut path = Vec::with_capacity(2);
        if let Some(t) = target {
            path.push(TargetNode::Container(t.container));
            if let Some(a) = t.anchor {
                path.push(TargetNode::Item(a));
            }
        }
        let shared = self
            .current
            .iter()
            .zip(&path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out: Vec<_> = self.current[shared..]
            .iter()
            .rev()
            .map(|n| OverTransition::Leave(*n))
            .collect();
        out.extend(path[shared..].iter().map(|n| OverTransition::Enter(*n)));
        self.current = path;
        out
    }

    /// Leave everything.
    pub fn clear(&mut self) -> Vec<OverTransition<TargetNode<C, I>>> {
        self.update(None)
    }
}

/// Queue plus optional observer.
pub(crate) struct Emitter<C, I> {
    queue: Vec<DragEvent<C, I>>,
    observer: Option<Box<dyn DragObserver<C, I>>>,
    record: bool,
}

impl<C, I> core::fmt::Debug for Emitter<C, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Emitter")
            .field("queued", &self.queue.len())
            .field("observer", &self.observer.is_some())
            .field("record", &self.record)
            .finish()
    }
}

impl<C: Clone, I: Clone> Emitter<C, I> {
    pub(crate) fn new(record: bool) -> Self {
        Self {
            queue: Vec::new(),
            observer: None,
            record,
        }
    }

    pub(crate) fn set_observer(&mut self, observer: Option<Box<dyn DragObserver<C, I>>>) {
        self.observer = observer;
    }

    pub(crate) fn set_record(&mut self, record: bool) {
        self.record = record;
        if !record {
            self.queue.clear();
        }
    }

    pub(crate) fn emit(&mut self, event: DragEvent<C, I>) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
        if self.record {
            self.queue.push(event);
        }
    }

    pub(crate) fn drain(&mut self) -> Vec<DragEvent<C, I>> {
        core::mem::take(&mut self.queue)
    }
}
