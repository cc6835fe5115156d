// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_collision::{Backend, FlatVec, Grid, Probe, QueryOptions, Strategy, TargetIndex};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_probes(count: usize, extent: f64) -> Vec<Probe> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let p = Point::new(rng.next_f64() * extent, rng.next_f64() * extent);
            Probe::at(p).with_rect(Rect::from_center_size(p, Size::new(24.0, 24.0)))
        })
        .collect()
}

fn flat() -> TargetIndex<u32, FlatVec> {
    TargetIndex::new()
}

fn grid() -> TargetIndex<u32, Grid> {
    TargetIndex::with_grid(Size::new(64.0, 64.0), Point::ZERO)
}

fn build<B: Backend>(mut idx: TargetIndex<u32, B>, rects: &[Rect]) -> TargetIndex<u32, B> {
    for (i, r) in rects.iter().copied().enumerate() {
        let _ = idx.insert(r, i as u32);
    }
    let _ = idx.commit();
    idx
}

fn bench_insert_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_commit");
    for &n in &[8usize, 16, 32] {
        let rects = gen_grid_rects(n, 40.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("flatvec_n{n}"), |b| {
            b.iter_batched(flat, |idx| black_box(build(idx, &rects)), BatchSize::SmallInput);
        });
        group.bench_function(format!("grid_n{n}"), |b| {
            b.iter_batched(grid, |idx| black_box(build(idx, &rects)), BatchSize::SmallInput);
        });
    }
    group.finish();
}

fn bench_best_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_at");
    for &n in &[8usize, 16, 32] {
        let rects = gen_grid_rects(n, 40.0);
        let probes = gen_probes(256, n as f64 * 40.0);
        let flat_idx = build(flat(), &rects);
        let grid_idx = build(grid(), &rects);
        group.throughput(Throughput::Elements(probes.len() as u64));
        for (name, strategy) in [
            ("closest_center", Strategy::ClosestCenter),
            ("rect_intersection", Strategy::RectIntersection),
        ] {
            group.bench_function(format!("flatvec_{name}_n{n}"), |b| {
                b.iter(|| {
                    for p in &probes {
                        black_box(flat_idx.best_at(p, &strategy, QueryOptions::default(), |_| true));
                    }
                });
            });
            group.bench_function(format!("grid_{name}_n{n}"), |b| {
                b.iter(|| {
                    for p in &probes {
                        black_box(grid_idx.best_at(p, &strategy, QueryOptions::default(), |_| true));
                    }
                });
            });
        }
    }
    group.finish();
}

fn bench_update_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_heavy");
    let rects = gen_grid_rects(16, 40.0);
    group.bench_function("grid_shift_then_commit", |b| {
        b.iter_batched(
            || {
                let mut idx = grid();
                let keys: Vec<_> = rects
                    .iter()
                    .copied()
                    .enumerate()
                    .map(|(i, r)| idx.insert(r, i as u32))
                    .collect();
                let _ = idx.commit();
                (idx, keys)
            },
            |(mut idx, keys)| {
                for (k, r) in keys.into_iter().zip(&rects) {
                    idx.update(k, *r + kurbo::Vec2::new(3.0, 0.0));
                }
                black_box(idx.commit());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_insert_commit, bench_best_at, bench_update_heavy);
criterion_main!(benches);
