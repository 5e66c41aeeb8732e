use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_tiles::core::{find_anchor, get_shape, ArtworkHandle, EngineSnapshot, Grid};
use tui_tiles::engine::{EngineConfig, PuzzleEngine};
use tui_tiles::term::{FrameBuffer, PuzzleView, TermSize};
use tui_tiles::types::{InputCommand, PieceId, PointerButton, Rotation, Viewport, STICK_THRESHOLD};

const VIEW: Viewport = Viewport {
    width: 1280.0,
    height: 768.0,
};

fn square_level() -> PuzzleEngine {
    let mut e = PuzzleEngine::new(EngineConfig::default(), VIEW);
    let art: Vec<ArtworkHandle> = (0..9).map(ArtworkHandle).collect();
    e.init_resources(&art);
    e.set_in_game(true);
    let _ = e.init_level(5, 5, &[5, 6, 7, 8]);
    e
}

fn bench_find_anchor(c: &mut Criterion) {
    let grid = Grid::new(16, 16, VIEW);
    let (ax, ay) = grid.anchor(255).unwrap_or((0.0, 0.0));

    c.bench_function("find_anchor_last_cell_16x16", |b| {
        b.iter(|| {
            find_anchor(
                black_box(grid.anchors()),
                black_box((ax + 3.0, ay - 3.0)),
                (128.0, 192.0),
                STICK_THRESHOLD,
            )
        })
    });
}

fn bench_validate_commit(c: &mut Criterion) {
    let mut grid = Grid::new(5, 5, VIEW);
    let shape = get_shape(8).unwrap_or(&tui_tiles::core::SHAPES[0]);

    c.bench_function("validate_commit_release_3x3", |b| {
        b.iter(|| {
            if grid.validate_placement(shape, black_box(6), Rotation::Deg90).is_ok() {
                grid.commit(shape, 6, Rotation::Deg90);
                grid.release(shape, 6, Rotation::Deg90);
            }
        })
    });
}

fn bench_drag_release(c: &mut Criterion) {
    let mut e = square_level();
    let target = e.grid().and_then(|g| g.anchor(0)).unwrap_or((0.0, 0.0));
    let mut now = 0u64;

    c.bench_function("drag_release_cycle", |b| {
        b.iter(|| {
            let (x, y) = e.piece(PieceId(5)).map(|p| p.position()).unwrap_or_default();
            e.handle(
                InputCommand::PointerDown {
                    x: x + 6.0,
                    y: y + 6.0,
                    button: PointerButton::Primary,
                },
                now,
            );
            e.handle(InputCommand::PointerMove { x: target.0 + 6.0, y: target.1 + 6.0 }, now);
            e.handle(InputCommand::PointerUp { button: PointerButton::Primary }, now);
            now += 250;
            e.tick(now);
            e.take_events()
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut e = square_level();
    let mut now = 0u64;

    c.bench_function("engine_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            e.tick(black_box(now))
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let e = square_level();
    let view = PuzzleView::default();
    let mut snap = EngineSnapshot::default();
    let mut fb = FrameBuffer::new(120, 40);

    c.bench_function("snapshot_render_120x40", |b| {
        b.iter(|| {
            e.snapshot_into(&mut snap);
            view.render_into(&snap, None, TermSize::new(120, 40), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_find_anchor,
    bench_validate_commit,
    bench_drag_release,
    bench_tick,
    bench_render
);
criterion_main!(benches);
