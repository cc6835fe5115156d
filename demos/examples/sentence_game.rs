// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unscramble a sentence by dragging words along a horizontal strip.
//!
//! Each drag carries the dragged word's rectangle, and targets are scored by
//! overlap (`Strategy::RectIntersection`).
//!
//! Run:
//! - `cargo run -p understory_demos --example sentence_game`

use kurbo::{Rect, Vec2};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_sortable::{DropResult, ListLayout, Sample, Sortable, SortableConfig, Strategy};

const SOLUTION: [&str; 5] = ["the", "quick", "brown", "fox", "jumps"];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let strip = ListLayout::horizontal(Rect::new(0.0, 0.0, 400.0, 40.0), 80.0);
    let config = SortableConfig::default().with_strategy(Strategy::RectIntersection);
    let mut game: Sortable<u8, &str> = Sortable::with_config(config).unwrap();
    game.register_container(0, ["fox", "quick", "the", "jumps", "brown"], strip)
        .unwrap();

    let mut seq = 0;
    for (k, word) in SOLUTION.into_iter().enumerate() {
        let Some((_, from)) = game.registry().position_of(word) else {
            continue;
        };
        if from == k {
            continue;
        }
        // Hold the word slightly right of the slot it should take.
        let held = strip.slot(k) + Vec2::new(10.0, 0.0);
        game.begin_drag(word).unwrap();
        seq += 1;
        let _ = game
            .sample(Sample::at(held.center().x, held.center().y, seq).with_rect(held))
            .unwrap();
        let end = game.commit().unwrap();
        assert_eq!(
            end.result,
            DropResult::Moved {
                container: 0,
                index: k
            }
        );
        info!(word, from, to = k, "moved");
    }

    let words = game.items(0).unwrap_or_default();
    assert_eq!(words, SOLUTION);
    println!("{}", words.join(" "));
}
