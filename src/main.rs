//! Terminal Rhyme Mahjong runner (default binary).
//!
//! Generates one puzzle (curated, or from the file in `RHYME_TEXT_PATH`),
//! then plays it with crossterm input and the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use rhyme_mahjong::adapter::AnalyzerRuntime;
use rhyme_mahjong::core::SimpleRng;
use rhyme_mahjong::generator::PuzzleGenerationService;
use rhyme_mahjong::input::{handle_key_event, should_quit};
use rhyme_mahjong::term::{BoardView, FrameBuffer, TerminalRenderer};
use rhyme_mahjong::{logging, PlaySession, SessionConfig};

const FRAME_MS: u64 = 33;

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    logging::init_tracing(config.log_path.as_deref())?;

    let runtime = AnalyzerRuntime::start_from_env()?;
    let text = config.custom_text()?;

    let mut service = PuzzleGenerationService::new(runtime.analyzer(), SimpleRng::new(config.seed));
    if let Some(kind) = config.layout {
        service = service.with_layout(kind);
    }
    let puzzle = runtime.block_on(service.generate_puzzle(config.difficulty, text.as_deref()))?;
    info!(
        puzzle = %puzzle.id,
        seed = config.seed,
        source = puzzle.metadata.source.as_str(),
        "session starting"
    );

    let mut session = PlaySession::new(puzzle);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, session: &mut PlaySession) -> Result<()> {
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last = Instant::now();

    loop {
        let elapsed = last.elapsed().as_millis() as u64;
        last += Duration::from_millis(elapsed);
        session.tick(elapsed as u32);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render(session.engine(), &session.view_state(), w, h, &mut fb);
        term.draw(&fb)?;

        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    session.apply(action);
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
