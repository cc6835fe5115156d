// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder a single vertical list.
//!
//! Drags the first row past the third, printing each event, then shows a stale
//! sample being discarded.
//!
//! Run:
//! - `cargo run -p understory_demos --example sortable_basics`
//! - `RUST_LOG=understory_sortable=trace cargo run -p understory_demos --example sortable_basics`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_sortable::{DragEvent, DropResult, ListLayout, Sample, SampleOutcome, Sortable};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut list: Sortable<&str, &str> = Sortable::new();
    let layout = ListLayout::vertical(Rect::new(0.0, 0.0, 200.0, 160.0), 40.0);
    list.register_container("groceries", ["milk", "eggs", "bread", "apples"], layout)
        .unwrap();
    list.set_observer(|e: &DragEvent<&str, &str>| println!("event: {e:?}"));

    list.begin_drag("milk").unwrap();
    // Row centers are at y = 20, 60, 100, 140.
    for (seq, y) in [(1, 25.0), (2, 62.0), (3, 101.0)] {
        let outcome = list.sample(Sample::at(100.0, y, seq)).unwrap();
        println!("sample {seq}: {outcome:?}");
    }
    // Delivered late; ignored.
    let late = list.sample(Sample::at(100.0, 140.0, 2)).unwrap();
    assert_eq!(late, SampleOutcome::Stale);

    println!("preview: {:?}", list.preview());
    let end = list.commit().unwrap();
    assert_eq!(
        end.result,
        DropResult::Moved {
            container: "groceries",
            index: 2
        }
    );
    println!("order: {:?}", list.items("groceries").unwrap_or_default());
}
