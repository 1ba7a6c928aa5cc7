//! Performance benchmarks for grid operations on the hot input paths.
//!
//! Pointer moves and stream saves happen once per user event, so these
//! should stay well under a frame even at the largest slider side:
//! - toggle / set on a 64×64 grid
//! - replace_all and stream parsing for a full grid
//! - pattern generation at every slider stop
//! - render projection used by every view

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pixelbits::adapters::{PixelAdapter, StreamEditor};
use pixelbits::bitgrid::parse_stream;
use pixelbits::patterns::{checkerboard, circle, SLIDER_RADIUS_BIAS};
use pixelbits::{BitGrid, GridView, HighlightState};

// =============================================================================
// Cell Operations
// =============================================================================

fn bench_toggle(c: &mut Criterion) {
    let mut grid = BitGrid::new(64).unwrap();

    c.bench_function("toggle_64x64", |b| {
        let mut i = 0;
        b.iter(|| {
            let _ = grid.toggle(black_box(i % 4096));
            i += 1;
        });
    });
}

fn bench_paint_drag(c: &mut Criterion) {
    let mut grid = BitGrid::new(64).unwrap();
    let mut hl = HighlightState::new();
    let mut pixels = PixelAdapter::new();

    c.bench_function("paint_drag_row", |b| {
        b.iter(|| {
            if let Ok(Some(update)) = pixels.pointer_down(&grid, 0) {
                let _ = update.apply(&mut grid);
            }
            for i in 1..64 {
                if let Some(update) = pixels.pointer_enter(&grid, black_box(i), true, &mut hl) {
                    let _ = update.apply(&mut grid);
                }
            }
            pixels.pointer_up();
        });
    });
}

// =============================================================================
// Whole-Grid Operations
// =============================================================================

fn bench_replace_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace_all");
    for side in [8, 32, 64] {
        let mut grid = BitGrid::new(side).unwrap();
        let cells = checkerboard(side).unwrap().cells();
        group.bench_with_input(BenchmarkId::from_parameter(side), &cells, |b, cells| {
            b.iter(|| grid.replace_all(black_box(cells)));
        });
    }
    group.finish();
}

fn bench_stream_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_save");
    for side in [8, 32, 64] {
        let grid = checkerboard(side).unwrap();
        let text = grid
            .rows()
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n");

        group.bench_with_input(BenchmarkId::new("parse", side), &text, |b, text| {
            b.iter(|| parse_stream(black_box(text)));
        });
        group.bench_with_input(BenchmarkId::new("save", side), &text, |b, text| {
            let mut hl = HighlightState::new();
            b.iter(|| {
                let mut editor = StreamEditor::new();
                editor.begin_edit(&grid, &mut hl);
                editor.update_buffer(black_box(text), &grid);
                editor.save(&grid)
            });
        });
    }
    group.finish();
}

fn bench_circle(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle");
    for side in [8, 16, 32, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, &side| {
            b.iter(|| circle(black_box(side), SLIDER_RADIUS_BIAS));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let grid = circle(64, SLIDER_RADIUS_BIAS).unwrap();
    let mut hl = HighlightState::new();
    hl.hover(2000, grid.num_bits());
    let pixels = PixelAdapter::readonly();

    c.bench_function("render_64x64", |b| {
        b.iter(|| pixels.render(black_box(&grid), &hl));
    });
}

criterion_group!(
    benches,
    bench_toggle,
    bench_paint_drag,
    bench_replace_all,
    bench_stream_save,
    bench_circle,
    bench_render
);

criterion_main!(benches);
