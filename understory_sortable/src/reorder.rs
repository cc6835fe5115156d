// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder planning: turn a drop target into a registry mutation.
//!
//! [`plan`] is a pure function of the registry's current state. It never
//! mutates; the engine applies the resulting [`Move`] in one step on commit.
//!
//! Index rules:
//! - Within one container the move behaves like an array move: the item lands
//!   at the anchor's original index, or last when dropped on empty space.
//! - Across containers the item is inserted at the anchor's index, or appended.
//! - An anchor that no longer belongs to the target container is treated as
//!   empty space.

use crate::registry::{Move, Registry};
use crate::types::{ContainerFlags, DropTarget, SortableId};

/// Why a plan resolved to [`Plan::Cancelled`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// No drop target.
    NoTarget,
    /// The dragged item is no longer in any container.
    ItemVanished,
    /// The target container is no longer registered.
    ContainerVanished,
    /// The target container does not accept foreign items.
    Rejected,
}

/// Outcome of planning a drop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Plan<C, I> {
    /// Apply this move.
    Move(Move<C, I>),
    /// The item already sits where it would land.
    Noop,
    /// Nothing should change.
    Cancelled(CancelReason),
}

impl<C, I> Plan<C, I> {
    /// The planned move, if any.
    pub fn as_move(&self) -> Option<&Move<C, I>> {
        match self {
            Self::Move(mv) => Some(mv),
            _ => None,
        }
    }
}

/// Plan dropping `item` onto `target`.
pub fn plan<C: SortableId, I: SortableId>(
    registry: &Registry<C, I>,
    item: I,
    target: Option<DropTarget<C, I>>,
) -> Plan<C, I> {
    let Some(target) = target else {
        return Plan::Cancelled(CancelReason::NoTarget);
    };
    let Some((from, from_index)) = registry.position_of(item) else {
        return Plan::Cancelled(CancelReason::ItemVanished);
    };
    let Some(to_items) = registry.items(target.container) else {
        return Plan::Cancelled(CancelReason::ContainerVanished);
    };
    if target.anchor == Some(item) {
        return Plan::Noop;
    }
    let anchor_index = target
        .anchor
        .and_then(|a| to_items.iter().position(|x| *x == a));

    let to_index = if from == target.container {
        // Post-removal, the last valid index is len - 1.
        anchor_index.unwrap_or(to_items.len() - 1)
    } else {
        let accepts = registry
            .flags(target.container)
            .is_some_and(|f| f.contains(ContainerFlags::ACCEPTS_FOREIGN));
        if !accepts {
            return Plan::Cancelled(CancelReason::Rejected);
        }
        anchor_index.unwrap_or(to_items.len())
    };

    if from == target.container && to_index == from_index {
        return Plan::Noop;
    }
    Plan::Move(Move {
        item,
        from,
        from_index,
        to: target.container,
        to_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ListLayout;
    use kurbo::Rect;

    fn registry(containers: &[(char, &[u32])]) -> Registry<char, u32> {
        let mut r = Registry::new();
        for (c, items) in containers {
            let layout = ListLayout::vertical(Rect::new(0.0, 0.0, 100.0, 100.0), 10.0);
            r.register_container(*c, items.iter().copied(), layout)
                .unwrap();
        }
        r
    }

    fn moved_to(p: Plan<char, u32>) -> Option<(char, usize)> {
        p.as_move().map(|m| (m.to, m.to_index))
    }

    #[test]
    fn same_container_moves_down_and_up() {
        let r = registry(&[('A', &[1, 2, 3, 4])]);
        assert_eq!(moved_to(plan(&r, 1, Some(DropTarget::item('A', 3)))), Some(('A', 2)));
        assert_eq!(moved_to(plan(&r, 4, Some(DropTarget::item('A', 2)))), Some(('A', 1)));
    }

    #[test]
    fn same_container_empty_space_moves_last() {
        let r = registry(&[('A', &[1, 2, 3])]);
        assert_eq!(moved_to(plan(&r, 1, Some(DropTarget::container('A')))), Some(('A', 2)));
        assert_eq!(plan(&r, 3, Some(DropTarget::container('A'))), Plan::Noop);
    }

    #[test]
    fn cross_container_inserts_at_anchor_or_appends() {
        let r = registry(&[('A', &[1, 2]), ('B', &[3, 4])]);
        assert_eq!(moved_to(plan(&r, 1, Some(DropTarget::item('B', 4)))), Some(('B', 1)));
        assert_eq!(moved_to(plan(&r, 1, Some(DropTarget::container('B')))), Some(('B', 2)));
    }

    #[test]
    fn self_drop_is_noop_and_missing_target_cancels() {
        let r = registry(&[('A', &[1, 2])]);
        assert_eq!(plan(&r, 1, Some(DropTarget::item('A', 1))), Plan::Noop);
        assert_eq!(plan(&r, 1, None), Plan::Cancelled(CancelReason::NoTarget));
        assert_eq!(
            plan(&r, 9, Some(DropTarget::container('A'))),
            Plan::Cancelled(CancelReason::ItemVanished)
        );
        assert_eq!(
            plan(&r, 1, Some(DropTarget::container('Z'))),
            Plan::Cancelled(CancelReason::ContainerVanished)
        );
    }

    #[test]
    fn vanished_anchor_falls_back_to_end() {
        let r = registry(&[('A', &[1, 2]), ('B', &[3])]);
        // 7 is not in B (it never was, or was removed mid-drag).
        assert_eq!(moved_to(plan(&r, 1, Some(DropTarget::item('B', 7)))), Some(('B', 1)));
    }

    #[test]
    fn closed_containers_reject_foreign_items() {
        let mut r = registry(&[('A', &[1, 2]), ('B', &[3])]);
        r.set_flags('B', ContainerFlags::DROP_TARGET).unwrap();
        assert_eq!(
            plan(&r, 1, Some(DropTarget::container('B'))),
            Plan::Cancelled(CancelReason::Rejected)
        );
        // Reordering inside a closed container is still allowed.
        r.set_flags('A', ContainerFlags::DROP_TARGET).unwrap();
        assert!(plan(&r, 1, Some(DropTarget::item('A', 2))).as_move().is_some());
    }
}
