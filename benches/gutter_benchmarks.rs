//! Benchmarks for line-number gutter geometry.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tabpad_core::{FontMetrics, LineNumberGutter, PaintRegion, UniformLayout};

fn layout(lines: usize) -> UniformLayout {
    UniformLayout {
        line_count: lines,
        line_height: 18.2,
        top_padding: 8.0,
    }
}

/// Benchmarks painting one viewport at the top and in the middle of a document.
fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("gutter_paint");
    let gutter = LineNumberGutter::default();
    let region = PaintRegion::viewport(900.0);

    for size in [100, 10_000, 1_000_000].iter() {
        let layout = layout(*size);
        let middle = layout.line_height * (*size as f32) / 2.0;

        group.bench_with_input(BenchmarkId::new("top", size), &layout, |b, layout| {
            b.iter(|| black_box(gutter.paint(layout, black_box(0.0), region)))
        });

        group.bench_with_input(BenchmarkId::new("middle", size), &layout, |b, layout| {
            b.iter(|| black_box(gutter.paint(layout, black_box(middle), region)))
        });
    }

    group.finish();
}

/// Benchmarks the width computation done on every repaint.
fn bench_width(c: &mut Criterion) {
    let gutter = LineNumberGutter::default();
    let metrics = FontMetrics::monospace(14.0, 1.3);

    c.bench_function("gutter_width", |b| {
        b.iter(|| {
            for lines in [1usize, 9, 99_999, 1_000_000] {
                black_box(gutter.width(black_box(lines), metrics));
            }
        })
    });
}

criterion_group!(benches, bench_paint, bench_width);
criterion_main!(benches);
