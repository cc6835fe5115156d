// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_sortable::{IndexBackend, ListLayout, Sample, Sortable, SortableConfig};

const COLUMN: f64 = 120.0;

fn board(columns: u32, cards: u32, backend: IndexBackend) -> Sortable<u32, u32> {
    let config = SortableConfig::default()
        .with_backend(backend)
        .with_record_events(false);
    let mut s = Sortable::with_config(config).unwrap();
    for c in 0..columns {
        let x0 = f64::from(c) * COLUMN;
        let layout = ListLayout::vertical(Rect::new(x0, 0.0, x0 + COLUMN - 10.0, 2000.0), 40.0);
        let items = (0..cards).map(|i| c * cards + i);
        s.register_container(c, items, layout).unwrap();
    }
    s
}

fn sweep(columns: u32, count: u64) -> Vec<Sample> {
    let width = f64::from(columns) * COLUMN;
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            Sample::at(t * width, 20.0 + t * 900.0, i)
        })
        .collect()
}

fn bench_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_samples");
    for &columns in &[4u32, 16, 64] {
        let samples = sweep(columns, 240);
        group.throughput(Throughput::Elements(samples.len() as u64));
        for (name, backend) in [
            ("flat", IndexBackend::Flat),
            ("grid", IndexBackend::grid(COLUMN)),
        ] {
            group.bench_function(format!("{name}_columns{columns}"), |b| {
                b.iter_batched(
                    || {
                        let mut s = board(columns, 20, backend);
                        s.begin_drag(0).unwrap();
                        s
                    },
                    |mut s| {
                        for sample in &samples {
                            black_box(s.sample(*sample).unwrap());
                        }
                        black_box(s.commit().unwrap());
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_samples);
criterion_main!(benches);
