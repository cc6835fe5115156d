// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pick a drop target for a few pointer positions.

use kurbo::{Point, Rect};
use understory_collision::{Probe, QueryOptions, Strategy, TargetIndex};

fn main() {
    let mut idx: TargetIndex<&str> = TargetIndex::new();
    let todo = idx.insert(Rect::new(0.0, 0.0, 100.0, 300.0), "todo");
    let _ = idx.insert(Rect::new(110.0, 0.0, 210.0, 300.0), "done");
    let dmg = idx.commit();
    println!("added {} regions", dmg.added.len());

    for p in [Point::new(50.0, 10.0), Point::new(150.0, 10.0), Point::new(500.0, 10.0)] {
        let hit = idx.best_at(
            &Probe::at(p),
            &Strategy::ClosestCenter,
            QueryOptions::default(),
            |_| true,
        );
        println!("{p:?} -> {:?}", hit.map(|c| c.payload));
    }

    // Widen the first column; the move shows up as damage.
    idx.update(todo, Rect::new(0.0, 0.0, 105.0, 300.0));
    let dmg = idx.commit();
    println!("damage: {:?}", dmg.union());
}
