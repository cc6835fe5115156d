// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Log output for drops that do not complete.
//!
//! A drop that finds nothing underneath is routine and logs at debug; a drop
//! whose target disappeared mid-drag is worth a warning.

use std::io;
use std::sync::{Arc, Mutex};

use kurbo::Rect;
use tracing::Level;
use understory_sortable::{DropResult, ListLayout, Sample, Sortable};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber recording `level` and above; return the log text.
fn logged(level: Level, f: impl FnOnce()) -> String {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(level)
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = sink.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn board() -> Sortable<char, u32> {
    let mut s = Sortable::new();
    let a = ListLayout::vertical(Rect::new(0.0, 0.0, 100.0, 300.0), 50.0);
    let b = ListLayout::vertical(Rect::new(120.0, 0.0, 220.0, 300.0), 50.0);
    s.register_container('A', [1, 2], a).unwrap();
    s.register_container('B', [3], b).unwrap();
    s
}

#[test]
fn vanished_target_container_warns() {
    let out = logged(Level::WARN, || {
        let mut s = board();
        s.begin_drag(1).unwrap();
        let _ = s.sample(Sample::at(170.0, 25.0, 1)).unwrap();
        let _ = s.unregister_container('B').unwrap();
        assert_eq!(s.commit().unwrap().result, DropResult::Cancelled);
    });
    assert!(out.contains("WARN"), "{out}");
    assert!(out.contains("drop target vanished"), "{out}");
    assert!(out.contains("ContainerVanished"), "{out}");
}

#[test]
fn drop_outside_every_container_is_not_a_warning() {
    let warnings = logged(Level::WARN, || {
        let mut s = board();
        s.begin_drag(1).unwrap();
        let _ = s.sample(Sample::at(600.0, 600.0, 1)).unwrap();
        assert_eq!(s.commit().unwrap().result, DropResult::Cancelled);
    });
    assert_eq!(warnings, "");

    let debug = logged(Level::DEBUG, || {
        let mut s = board();
        s.begin_drag(1).unwrap();
        let _ = s.sample(Sample::at(600.0, 600.0, 1)).unwrap();
        let _ = s.commit().unwrap();
    });
    assert!(debug.contains("drop cancelled"), "{debug}");
    assert!(debug.contains("NoTarget"), "{debug}");
}
