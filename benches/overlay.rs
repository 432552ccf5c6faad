use criterion::{Criterion, black_box, criterion_group, criterion_main};

use markpeek::config::OverlayConfig;
use markpeek::host::fixture::FixtureHost;
use markpeek::host::{BufferId, BufferKind, ScreenPos, ViewportSize};
use markpeek::{marks, overlay};

const MAIN: BufferId = BufferId(1);

fn marked_host() -> FixtureHost {
    let mut host = FixtureHost::new();
    let lines: Vec<String> = (0..200)
        .map(|i| format!("    line {i} with some indented content"))
        .collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    host.add_buffer(MAIN, "main.txt", BufferKind::Normal, &line_refs);
    for (i, name) in ('a'..='z').enumerate() {
        host.add_mark(&name.to_string(), MAIN, i + 1, 1);
    }
    host
}

fn bench_place(c: &mut Criterion) {
    let config = OverlayConfig::default();
    let viewport = ViewportSize {
        width: 80,
        height: 24,
    };
    c.bench_function("overlay_place_full_viewport", |b| {
        b.iter(|| {
            for row in 0..24u16 {
                for col in 0..80u16 {
                    black_box(overlay::place(
                        &config,
                        Some(ScreenPos { row, col }),
                        viewport,
                        black_box(8),
                    ));
                }
            }
        });
    });
}

fn bench_collect(c: &mut Criterion) {
    let host = marked_host();
    c.bench_function("collect_26_marks", |b| {
        b.iter(|| black_box(marks::collect(&host)));
    });
}

fn bench_render_lines(c: &mut Criterion) {
    let host = marked_host();
    let records = marks::collect(&host).unwrap();
    c.bench_function("render_26_mark_lines", |b| {
        b.iter(|| black_box(overlay::render_lines(&records)));
    });
}

criterion_group!(benches, bench_place, bench_collect, bench_render_lines);
criterion_main!(benches);
