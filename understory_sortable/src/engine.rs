// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Sortable`] engine: registry, detector, session and events in one place.

use tracing::{debug, trace, warn};
use understory_collision::{Backend, CollisionStrategy, FlatVec};

use crate::collision::Detector;
use crate::config::SortableConfig;
use crate::error::{ConfigError, Result, SortableError};
use crate::events::{
    DragEnd, DragEvent, DragObserver, DragOver, DragStart, Emitter, OverState, OverTransition,
    TargetNode,
};
use crate::geometry::ContainerGeometry;
use crate::registry::{Registry, Snapshot};
use crate::reorder::{self, CancelReason, Plan};
use crate::session::{DragMachine, DragSession};
use crate::types::{ContainerFlags, DragPhase, DropResult, Sample, SortableId};

/// What happened to a sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SampleOutcome<C, I> {
    /// Older than the last accepted sample; ignored.
    Stale,
    /// Accepted; the target did not change.
    Unchanged,
    /// Accepted; the target changed.
    Over(DragOver<C, I>),
}

/// Multi-container sortable engine.
///
/// Owns the [`Registry`] and runs at most one drag at a time. All methods are
/// synchronous and take `&mut self`; the registry only changes through the
/// explicit container/item methods and through [`commit`](Self::commit).
#[derive(Debug)]
pub struct Sortable<C: SortableId, I: SortableId> {
    registry: Registry<C, I>,
    detector: Detector<C>,
    machine: DragMachine<C, I>,
    over: OverState<C, I>,
    emitter: Emitter<C, I>,
    config: SortableConfig,
}

impl<C: SortableId, I: SortableId> Default for Sortable<C, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SortableId, I: SortableId> Sortable<C, I> {
    /// An engine with the default configuration.
    pub fn new() -> Self {
        Self::assemble(SortableConfig::default(), Box::new(FlatVec::default()))
    }

    /// An engine with an explicit configuration.
    ///
    /// Fails if the configuration does not [validate](SortableConfig::validate).
    pub fn with_config(config: SortableConfig) -> core::result::Result<Self, ConfigError> {
        config.validate()?;
        let backend = config.backend.build()?;
        Ok(Self::assemble(config, backend))
    }

    fn assemble(config: SortableConfig, backend: Box<dyn Backend>) -> Self {
        let mut detector = Detector::new(backend);
        detector.set_strategy(config.strategy);
        detector.set_max_distance(config.max_distance);
        detector.set_item_hit_slop(config.item_hit_slop);
        Self {
            registry: Registry::new(),
            detector,
            machine: DragMachine::default(),
            over: OverState::new(),
            emitter: Emitter::new(config.record_events),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &SortableConfig {
        &self.config
    }

    /// Read-only view of the registry.
    pub fn registry(&self) -> &Registry<C, I> {
        &self.registry
    }

    /// Copy of all container sequences.
    pub fn snapshot(&self) -> Snapshot<C, I> {
        self.registry.snapshot()
    }

    /// Items of a container, in order.
    pub fn items(&self, container: C) -> Option<&[I]> {
        self.registry.items(container)
    }

    /// Current drag phase.
    pub fn phase(&self) -> DragPhase {
        self.machine.phase()
    }

    /// The active drag session.
    pub fn session(&self) -> Option<&DragSession<C, I>> {
        self.machine.session()
    }

    /// See [`Registry::register_container`].
    pub fn register_container(
        &mut self,
        id: C,
        items: impl IntoIterator<Item = I>,
        geometry: impl ContainerGeometry<I> + 'static,
    ) -> Result<(), C, I> {
        self.registry.register_container(id, items, geometry)?;
        debug!(container = ?id, "registered container");
        Ok(())
    }

    /// See [`Registry::unregister_container`].
    pub fn unregister_container(&mut self, id: C) -> Result<Vec<I>, C, I> {
        let orphans = self.registry.unregister_container(id)?;
        debug!(container = ?id, orphans = orphans.len(), "unregistered container");
        Ok(orphans)
    }

    /// See [`Registry::insert_item`].
    pub fn insert_item(&mut self, container: C, item: I, index: usize) -> Result<(), C, I> {
        self.registry.insert_item(container, item, index)
    }

    /// See [`Registry::remove_item`].
    pub fn remove_item(&mut self, item: I) -> Result<(C, usize), C, I> {
        self.registry.remove_item(item)
    }

    /// See [`Registry::set_flags`].
    pub fn set_flags(&mut self, container: C, flags: ContainerFlags) -> Result<(), C, I> {
        self.registry.set_flags(container, flags)
    }

    /// See [`Registry::set_geometry`].
    pub fn set_geometry(
        &mut self,
        container: C,
        geometry: impl ContainerGeometry<I> + 'static,
    ) -> Result<(), C, I> {
        self.registry.set_geometry(container, geometry)
    }

    /// Replace the collision strategy with a custom one.
    pub fn set_strategy(&mut self, strategy: impl CollisionStrategy + 'static) {
        self.detector.set_strategy(strategy);
    }

    /// Forward every event to `observer`.
    pub fn set_observer(&mut self, observer: impl DragObserver<C, I> + 'static) {
        self.emitter.set_observer(Some(Box::new(observer)));
    }

    /// Stop forwarding events.
    pub fn clear_observer(&mut self) {
        self.emitter.set_observer(None);
    }

    /// Enable or disable the event queue. Disabling drops queued events.
    pub fn set_record_events(&mut self, record: bool) {
        self.config.record_events = record;
        self.emitter.set_record(record);
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<DragEvent<C, I>> {
        self.emitter.drain()
    }

    /// Start dragging `item`.
    pub fn begin_drag(&mut self, item: I) -> Result<DragStart<C, I>, C, I> {
        if let Some(active) = self.machine.session() {
            return Err(SortableError::DragAlreadyActive(active.item));
        }
        let (origin, origin_index) = self
            .registry
            .position_of(item)
            .ok_or(SortableError::ItemNotFound(item))?;
        let session = DragSession::new(
            item,
            origin,
            origin_index,
            self.registry.snapshot(),
            self.registry.revision(),
        );
        self.machine.begin(session)?;

        debug!(item = ?item, container = ?origin, index = origin_index, "drag started");
        let start = DragStart {
            item,
            origin_container: origin,
            origin_index,
        };
        self.emitter.emit(DragEvent::Start(start));
        Ok(start)
    }

    /// Feed one pointer sample.
    ///
    /// A geometry failure aborts the call and leaves the session unchanged.
    pub fn sample(&mut self, sample: Sample) -> Result<SampleOutcome<C, I>, C, I> {
        let session = self.machine.session().ok_or(SortableError::NotDragging)?;
        if session.is_stale(sample.sequence) {
            trace!(
                sequence = sample.sequence,
                last = ?session.sequence,
                "discarded stale sample"
            );
            return Ok(SampleOutcome::Stale);
        }
        let item = session.item;
        let home = self
            .registry
            .find_container_of(item)
            .unwrap_or(session.origin);

        let probe = sample.probe();
        let damage = self.detector.refresh(&self.registry)?;
        if !damage.is_empty() {
            trace!(
                added = damage.added.len(),
                moved = damage.moved.len(),
                removed = damage.removed.len(),
                "container regions changed"
            );
        }
        let target = self.detector.detect(&self.registry, home, &probe)?;

        let previous = self
            .machine
            .session_mut()?
            .record(sample.sequence, probe, target);
        if previous == target {
            return Ok(SampleOutcome::Unchanged);
        }
        trace!(item = ?item, target = ?target, sequence = sample.sequence, "target changed");
        let over = DragOver {
            item,
            target,
            previous,
            transitions: self.over.update(target),
        };
        self.emitter.emit(DragEvent::Over(over.clone()));
        Ok(SampleOutcome::Over(over))
    }

    /// The plan a commit would execute right now. Mutates nothing.
    pub fn preview(&self) -> Option<Plan<C, I>> {
        let session = self.machine.session()?;
        Some(reorder::plan(&self.registry, session.item, session.target))
    }

    /// Drop the item on its current target.
    pub fn commit(&mut self) -> Result<DragEnd<C, I>, C, I> {
        let session = self.machine.settle()?;
        let item = session.item;
        let result = match reorder::plan(&self.registry, item, session.target) {
            Plan::Move(mv) => match self.registry.apply(&mv) {
                Ok(()) => DropResult::Moved {
                    container: mv.to,
                    index: mv.to_index,
                },
                Err(err) => {
                    warn!(item = ?item, error = %err, "move rejected; cancelling drag");
                    DropResult::Cancelled
                }
            },
            Plan::Noop => DropResult::Noop,
            Plan::Cancelled(reason @ (CancelReason::NoTarget | CancelReason::Rejected)) => {
                debug!(item = ?item, reason = ?reason, "drop cancelled");
                DropResult::Cancelled
            }
            Plan::Cancelled(reason) => {
                warn!(item = ?item, reason = ?reason, "drop target vanished; cancelling drag");
                DropResult::Cancelled
            }
        };
        self.machine.settled();
        debug_assert!(self.registry.check_invariants());
        debug_assert!(
            matches!(result, DropResult::Moved { .. }) || self.untouched_since(&session),
            "a drop that moved nothing changed the registry"
        );

        debug!(item = ?item, result = ?result, "drag committed");
        Ok(self.finish(item, result))
    }

    /// Abandon the drag. The registry is untouched.
    pub fn cancel(&mut self) -> Result<DragEnd<C, I>, C, I> {
        let session = self.machine.cancel()?;
        debug_assert!(self.untouched_since(&session), "cancel changed the registry");
        debug!(item = ?session.item, "drag cancelled");
        Ok(self.finish(session.item, DropResult::Cancelled))
    }

    /// Drop any session and return to idle without emitting events.
    ///
    /// Returns the leave transitions for whatever the pointer was over, so a
    /// caller tracking enter/leave pairs can close them.
    pub fn reset(&mut self) -> Vec<OverTransition<TargetNode<C, I>>> {
        if let Some(session) = self.machine.reset() {
            debug!(item = ?session.item, "drag reset");
        }
        self.over.clear()
    }

    /// True when the registry matches the session's pre-drag snapshot, or when
    /// it was edited outside the drag since the session began.
    fn untouched_since(&self, session: &DragSession<C, I>) -> bool {
        self.registry.revision() != session.revision
            || self.registry.snapshot() == session.snapshot
    }

    fn finish(&mut self, item: I, result: DropResult<C>) -> DragEnd<C, I> {
        let end = DragEnd {
            item,
            result,
            transitions: self.over.clear(),
        };
        self.emitter.emit(DragEvent::End(end.clone()));
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use crate::geometry::ListLayout;
    use crate::types::DropTarget;
    use kurbo::Rect;

    fn engine() -> Sortable<char, u32> {
        let mut s = Sortable::new();
        let a = ListLayout::vertical(Rect::new(0.0, 0.0, 100.0, 300.0), 50.0);
        let b = ListLayout::vertical(Rect::new(120.0, 0.0, 220.0, 300.0), 50.0);
        s.register_container('A', [1, 2, 3], a).unwrap();
        s.register_container('B', [4, 5], b).unwrap();
        s
    }

    #[test]
    fn operations_require_an_active_drag() {
        let mut s = engine();
        assert_eq!(s.sample(Sample::at(0.0, 0.0, 0)), Err(SortableError::NotDragging));
        assert_eq!(s.commit(), Err(SortableError::NotDragging));
        assert_eq!(s.cancel(), Err(SortableError::NotDragging));
        assert_eq!(s.preview(), None);
        assert_eq!(s.phase(), DragPhase::Idle);
    }

    #[test]
    fn unknown_item_cannot_be_dragged() {
        let mut s = engine();
        assert_eq!(s.begin_drag(42), Err(SortableError::ItemNotFound(42)));
        assert_eq!(s.phase(), DragPhase::Idle);
    }

    #[test]
    fn preview_tracks_the_target_without_mutating() {
        let mut s = engine();
        s.begin_drag(1).unwrap();
        let _ = s.sample(Sample::at(170.0, 60.0, 1)).unwrap();
        let before = s.snapshot();
        let plan = s.preview().unwrap();
        assert_eq!(plan.as_move().map(|m| (m.to, m.to_index)), Some(('B', 1)));
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn repeated_target_is_unchanged() {
        let mut s = engine();
        s.begin_drag(1).unwrap();
        assert!(matches!(
            s.sample(Sample::at(50.0, 120.0, 1)),
            Ok(SampleOutcome::Over(_))
        ));
        assert_eq!(
            s.sample(Sample::at(55.0, 125.0, 2)),
            Ok(SampleOutcome::Unchanged)
        );
        assert_eq!(
            s.session().and_then(|x| x.target),
            Some(DropTarget::item('A', 3))
        );
    }

    struct Flaky;

    impl ContainerGeometry<u32> for Flaky {
        fn bounds(&self) -> core::result::Result<Rect, GeometryError> {
            Err(GeometryError::Provider("measuring".into()))
        }

        fn item_bounds(
            &self,
            _: &u32,
            _: usize,
        ) -> core::result::Result<Option<Rect>, GeometryError> {
            Ok(None)
        }
    }

    #[test]
    fn geometry_failure_keeps_session_intact() {
        let mut s = engine();
        s.begin_drag(1).unwrap();
        let _ = s.sample(Sample::at(50.0, 120.0, 1)).unwrap();
        let before = s.session().cloned();
        s.register_container('C', [9], Flaky).unwrap();
        assert_eq!(
            s.sample(Sample::at(170.0, 10.0, 2)),
            Err(SortableError::Geometry(GeometryError::Provider(
                "measuring".into()
            )))
        );
        assert_eq!(s.session().cloned(), before);
        assert_eq!(s.phase(), DragPhase::Dragging);
    }

    #[test]
    fn reset_is_silent() {
        let mut s = engine();
        s.begin_drag(1).unwrap();
        let _ = s.sample(Sample::at(170.0, 10.0, 1)).unwrap();
        let _ = s.drain_events();
        assert_eq!(
            s.reset(),
            vec![
                OverTransition::Leave(TargetNode::Item(4)),
                OverTransition::Leave(TargetNode::Container('B')),
            ]
        );
        assert!(s.reset().is_empty());
        assert_eq!(s.phase(), DragPhase::Idle);
        assert!(s.session().is_none());
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn default_engine_matches_default_config() {
        let s: Sortable<char, u32> = Sortable::new();
        assert_eq!(*s.config(), SortableConfig::default());
        assert!(Sortable::<char, u32>::with_config(SortableConfig::default()).is_ok());
    }

    #[test]
    fn session_records_the_registry_it_started_from() {
        let mut s = engine();
        let revision = s.registry().revision();
        s.begin_drag(2).unwrap();
        let session = s.session().unwrap();
        assert_eq!(session.revision, revision);
        assert_eq!(session.snapshot, s.snapshot());
        let _ = s.sample(Sample::at(170.0, 10.0, 1)).unwrap();
        let end = s.cancel().unwrap();
        assert_eq!(end.result, DropResult::Cancelled);
        assert_eq!(s.registry().revision(), revision);
    }

    #[test]
    fn vanished_item_cancels_on_commit() {
        let mut s = engine();
        s.begin_drag(1).unwrap();
        let _ = s.sample(Sample::at(170.0, 10.0, 1)).unwrap();
        let _ = s.remove_item(1).unwrap();
        let end = s.commit().unwrap();
        assert_eq!(end.result, DropResult::Cancelled);
        assert_eq!(s.items('B'), Some(&[4, 5][..]));
        assert_eq!(s.phase(), DragPhase::Ended);
    }
}
