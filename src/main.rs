//! Terminal tiles runner (default binary).
//!
//! Mouse-driven: drag pieces with the left button, rotate with the right
//! button. Rendering goes through the framebuffer renderer; logs go to the file
//! named by `TILES_LOG_PATH` since stdout belongs to the terminal.

use std::env;
use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing_subscriber::EnvFilter;

use tui_tiles::core::{load_backdrop, ArtworkHandle, EngineSnapshot, SHAPES};
use tui_tiles::engine::{EngineConfig, EngineEvent, LevelCatalog, PuzzleEngine};
use tui_tiles::input::{EventMapper, KeyAction, Mapped};
use tui_tiles::term::{FrameBuffer, PuzzleView, TermSize, TerminalRenderer};
use tui_tiles::types::{InputCommand, Projection, TICK_MS};

fn main() -> Result<()> {
    init_logging()?;

    let config = EngineConfig::from_env();
    let catalog = LevelCatalog::from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, &catalog);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "runner stopped");
    }
    result
}

/// Install a file-backed subscriber when `TILES_LOG_PATH` is set.
fn init_logging() -> Result<()> {
    let Ok(path) = env::var("TILES_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    let filter = EnvFilter::try_new(env::var("TILES_LOG").unwrap_or_else(|_| "info".to_string()))
        .context("parsing TILES_LOG")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: EngineConfig, catalog: &LevelCatalog) -> Result<()> {
    let projection = Projection::default();
    let mapper = EventMapper::new(projection);
    let view = PuzzleView::new(projection);

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut size = TermSize::new(w, h);

    let mut engine = PuzzleEngine::new(config, projection.viewport(w, h));
    let artwork: Vec<ArtworkHandle> = (0..SHAPES.len() as u32).map(ArtworkHandle).collect();
    engine.init_resources(&artwork);
    if let Ok(path) = env::var("TILES_GRID_BG") {
        engine.set_backdrop(load_backdrop(path));
    }
    engine.set_in_game(true);

    let mut level = 0usize;
    start_level(&mut engine, catalog, level);

    let clock = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut fb = FrameBuffer::new(w, h);
    let mut snap = EngineSnapshot::default();
    let mut needs_draw = true;

    loop {
        if needs_draw {
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, engine.backdrop(), size, &mut fb);
            term.draw_swap(&mut fb)?;
            needs_draw = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            let ev = event::read()?;
            let now = now_ms(clock);
            if let Event::Resize(cols, rows) = ev {
                size = TermSize::new(cols, rows);
                term.invalidate();
                needs_draw = true;
            }
            match mapper.map(&ev) {
                Mapped::Quit => return Ok(()),
                Mapped::Commands(commands) => {
                    for command in commands {
                        engine.handle(command, now);
                    }
                }
                Mapped::Key(KeyAction::Rotate) => engine.handle(InputCommand::SecondaryAction, now),
                Mapped::Key(KeyAction::NextLevel) => {
                    level = catalog.next_index(level);
                    start_level(&mut engine, catalog, level);
                }
                Mapped::Key(KeyAction::PrevLevel) => {
                    level = catalog.prev_index(level);
                    start_level(&mut engine, catalog, level);
                }
                Mapped::Key(KeyAction::Restart) => start_level(&mut engine, catalog, level),
                Mapped::Ignored => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if engine.tick(now_ms(clock)) {
                needs_draw = true;
            }
            for ev in engine.take_events() {
                match ev {
                    EngineEvent::Occupancy(occupancy) => {
                        if let Ok(json) = serde_json::to_string(&occupancy) {
                            tracing::trace!(occupancy = %json, "release");
                        }
                    }
                    EngineEvent::LevelComplete { .. } => {
                        tracing::info!(level, "level solved");
                    }
                    EngineEvent::RedrawNeeded => needs_draw = true,
                }
            }
        }
    }
}

fn start_level(engine: &mut PuzzleEngine, catalog: &LevelCatalog, index: usize) {
    let Some(level) = catalog.get(index) else {
        tracing::warn!(index, "no such level");
        return;
    };
    if let Err(err) = engine.start_level(level) {
        tracing::error!(level = %level.name, error = %err, "level rejected");
    }
}

fn now_ms(clock: Instant) -> u64 {
    clock.elapsed().as_millis() as u64
}
