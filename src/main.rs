//! Host simulator (default binary).
//!
//! Two players share the keyboard; a TCP client may inject raw link bytes as
//! well. Both sources feed one byte ring, exactly like the serial receive path
//! on the board. The console renders into an in-memory copy of the display
//! registers, which the terminal view decodes and draws.
//!
//! The JSON match report is printed to stdout after the terminal is restored.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use duel_tetris::adapter::Bridge;
use duel_tetris::core::PackedFrame;
use duel_tetris::engine::{Console, EngineConfig, InstantCounter, TickCounter, TraceMirror};
use duel_tetris::hud::hud_for;
use duel_tetris::input::{byte_ring, should_quit, ByteConsumer, ByteProducer, InputEvent, KeyBridge};
use duel_tetris::logging::setup_logging;
use duel_tetris::report::MatchReport;
use duel_tetris::term::{Canvas, DuelView, HudPhase, Screen, VIEW_HEIGHT, VIEW_WIDTH};
use duel_tetris::types::MatchMods;

const FRAME_PERIOD: Duration = Duration::from_millis(16);
const INPUT_POLL: Duration = Duration::from_millis(1);

type SimConsole = Console<ByteConsumer, PackedFrame, TraceMirror>;

fn main() -> Result<()> {
    setup_logging()?;
    let config = EngineConfig::from_env();
    info!(?config, "simulator starting");

    let (mut producer, consumer) = byte_ring(config.ring_capacity);
    let mut bridge = Bridge::start_from_env();
    let mut counter = InstantCounter::new(config.counter_hz);
    let mut console = Console::new(consumer, PackedFrame::new(), TraceMirror, config);

    let mut screen = Screen::new();
    screen.enter()?;
    let result = run(
        &mut screen,
        &mut console,
        &mut counter,
        &mut producer,
        bridge.as_mut(),
    );
    // Always try to restore terminal state.
    let _ = screen.exit();
    let mods = result?;

    let report = MatchReport::new(console.outcome(), mods, producer.dropped());
    println!("{}", report.to_json()?);
    Ok(())
}

fn forward(producer: &mut ByteProducer, event: InputEvent) {
    producer.push_slice(&event.to_wire());
}

/// Returns the mods the last match was played with.
fn run(
    screen: &mut Screen,
    console: &mut SimConsole,
    counter: &mut InstantCounter,
    producer: &mut ByteProducer,
    mut bridge: Option<&mut Bridge>,
) -> Result<MatchMods> {
    let view = DuelView;
    let mut keys = KeyBridge::new();
    let mut canvas = Canvas::new(VIEW_WIDTH, VIEW_HEIGHT);
    let mut mods = MatchMods::default();
    let mut last_draw: Option<Instant> = None;

    loop {
        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(mods);
                        }
                        if let Some(ev) = keys.handle_key_press(key.code) {
                            forward(producer, ev);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(ev) = keys.handle_key_release(key.code) {
                            forward(producer, ev);
                        }
                    }
                },
                Event::Resize(..) => screen.invalidate(),
                _ => {}
            }
        }
        for ev in keys.update() {
            forward(producer, ev);
        }
        if let Some(bridge) = bridge.as_deref_mut() {
            bridge.pump(producer);
        }

        console.run_iteration(counter.now());

        if last_draw.map_or(true, |t| t.elapsed() >= FRAME_PERIOD) {
            let hud = hud_for(console.phase());
            if matches!(hud.phase, HudPhase::Lobby | HudPhase::Playing) {
                mods = hud.mods;
            }
            view.render(console.surface(), &hud, &mut canvas);
            screen.present(&mut canvas)?;
            last_draw = Some(Instant::now());
        }
    }
}
