// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A kanban board: cards move between columns.
//!
//! Shows cross-container moves, a column that refuses foreign cards, a drop
//! outside every column, and the enter/leave transitions carried by
//! `DragOver` and `DragEnd`.
//!
//! Run:
//! - `cargo run -p understory_demos --example sortable_kanban`

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_sortable::{
    ContainerFlags, DropResult, IndexBackend, ListLayout, Sample, SampleOutcome, Sortable,
    SortableConfig,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Column {
    Todo,
    Doing,
    Done,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct Card(u16);

const COLUMN_WIDTH: f64 = 180.0;
const GUTTER: f64 = 20.0;
const CARD: Size = Size::new(COLUMN_WIDTH, 60.0);

fn column_rect(i: usize) -> Rect {
    let x0 = i as f64 * (COLUMN_WIDTH + GUTTER);
    Rect::new(x0, 0.0, x0 + COLUMN_WIDTH, 600.0)
}

// Pointer over card slot `slot` of column `i`.
fn over(i: usize, slot: usize, seq: u64) -> Sample {
    let r = column_rect(i);
    Sample::at(r.center().x, CARD.height * slot as f64 + 10.0, seq)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("understory_sortable=debug")),
        )
        .init();

    let config = SortableConfig::default()
        .with_item_hit_slop(4.0)
        .with_backend(IndexBackend::grid(100.0));
    let mut board: Sortable<Column, Card> = Sortable::with_config(config).unwrap();
    let columns = [
        (Column::Todo, vec![Card(1), Card(2), Card(3)]),
        (Column::Doing, vec![Card(4)]),
        (Column::Done, vec![Card(5), Card(6)]),
    ];
    for (i, (column, cards)) in columns.into_iter().enumerate() {
        let layout = ListLayout::vertical(column_rect(i), CARD.height);
        board.register_container(column, cards, layout).unwrap();
    }

    // Card 2 goes on top of Doing.
    board.begin_drag(Card(2)).unwrap();
    for sample in [over(0, 1, 1), over(1, 3, 2), over(1, 0, 3)] {
        if let SampleOutcome::Over(o) = board.sample(sample).unwrap() {
            println!("over {:?}: {:?}", o.target, o.transitions);
        }
    }
    let end = board.commit().unwrap();
    assert_eq!(
        end.result,
        DropResult::Moved {
            container: Column::Doing,
            index: 0
        }
    );
    println!("dropped, leaving {:?}", end.transitions);

    // Done only takes cards through review; foreign drops are refused.
    board
        .set_flags(Column::Done, ContainerFlags::DROP_TARGET)
        .unwrap();
    board.begin_drag(Card(1)).unwrap();
    let _ = board.sample(over(2, 0, 1)).unwrap();
    assert_eq!(board.session().and_then(|s| s.target), None);
    assert_eq!(board.commit().unwrap().result, DropResult::Cancelled);

    // Released in the gutter.
    board.begin_drag(Card(4)).unwrap();
    let _ = board
        .sample(Sample::at(COLUMN_WIDTH + GUTTER / 2.0, 30.0, 1))
        .unwrap();
    assert_eq!(board.commit().unwrap().result, DropResult::Cancelled);

    for column in [Column::Todo, Column::Doing, Column::Done] {
        println!("{column:?}: {:?}", board.items(column).unwrap_or_default());
    }
    println!("{} events recorded", board.drain_events().len());
}
