mod display;
mod pointer_hand;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;

use gesture_shooter::audio::{AudioSink, MuteAudio, Sound};
use gesture_shooter::config::GameConfig;
use gesture_shooter::error::GameError;
use gesture_shooter::perception::PerceptionSource;
use gesture_shooter::session::Session;
use gesture_shooter::state::{GameEvent, GameStatus};

use display::TerminalCanvas;
use pointer_hand::PointerHand;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// First terminal row of the play grid (row 0 is the HUD).
const GRID_TOP: u16 = 1;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: the terminal belongs to the game.  `RUST_LOG` picks the
/// filter (default `warn`), `GESTURE_SHOOTER_LOG` the file.
fn init_logging() {
    let path = std::env::var_os("GESTURE_SHOOTER_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("gesture_shooter.log"));

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // No file, no logs; stderr would tear the screen.
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// First CLI argument or `GESTURE_SHOOTER_CONFIG`; defaults otherwise.
fn load_config() -> Result<GameConfig, GameError> {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("GESTURE_SHOOTER_CONFIG"))
        .map(PathBuf::from);
    match path {
        Some(path) => Ok(GameConfig::load(path)?),
        None => Ok(GameConfig::default()),
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Rings the terminal bell on hits.  Shots stay silent, a bell per shot is
/// too much.
struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, sound: Sound) {
        if sound == Sound::Hit {
            let mut out = stdout();
            let _ = out.execute(Print('\x07'));
            let _ = out.flush();
        }
    }
}

// ── Start screen ──────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_start_screen<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    error: Option<&str>,
) -> std::io::Result<MenuResult> {
    display::draw_start_screen(out, error)?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            })) => match code {
                KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
                    return Ok(MenuResult::Start)
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit)
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(MenuResult::Quit)
                }
                _ => {}
            },
            Ok(Event::Resize(..)) => display::draw_start_screen(out, error)?,
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Outcome {
    Quit,
    Restart,
}

/// Runs frames until the player quits or asks for a restart after game over.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session<PointerHand>,
    canvas: &mut TerminalCanvas,
    rx: &mpsc::Receiver<Event>,
    clock: Instant,
) -> std::io::Result<Outcome> {
    let mut rng = thread_rng();
    let mut bell = TerminalBell;
    let mut mute = MuteAudio;
    let mut muted = false;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match &ev {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(Outcome::Quit);
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(Outcome::Quit);
                    }
                    KeyCode::Char('r') | KeyCode::Char('R')
                        if session.status() == GameStatus::GameOver =>
                    {
                        return Ok(Outcome::Restart);
                    }
                    KeyCode::Char('m') | KeyCode::Char('M') => muted = !muted,
                    _ => {}
                },
                Event::Resize(width, height) => {
                    *canvas = TerminalCanvas::for_terminal(*width, *height);
                    session.resize(canvas.viewport());
                    session.perception_mut().resize(canvas.cols(), canvas.rows());
                }
                _ => {}
            }
            session.perception_mut().handle_event(&ev, frame);
        }
        session.perception_mut().update(frame);

        let now_ms = clock.elapsed().as_millis() as u64;
        let events = session.tick(now_ms, &mut rng, canvas);

        let audio: &mut dyn AudioSink = if muted { &mut mute } else { &mut bell };
        for event in &events {
            match event {
                GameEvent::Sound(sound) => audio.play(*sound),
                GameEvent::GameOver { final_score } => {
                    log::info!("final score {final_score}, level {}", session.snapshot().level);
                }
                _ => {}
            }
        }

        display::present(out, canvas, &session.snapshot())?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging();
    let config = load_config()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> Result<(), GameError> {
    let (width, height) = terminal::size()?;
    let mut canvas = TerminalCanvas::for_terminal(width, height);
    let hand = PointerHand::new(canvas.cols(), canvas.rows(), GRID_TOP);
    let mut session = Session::new(config, canvas.viewport(), hand);
    let clock = Instant::now();

    let mut last_error: Option<String> = None;
    let mut restart = false;

    loop {
        if !restart {
            match show_start_screen(out, rx, last_error.as_deref())? {
                MenuResult::Quit => break,
                MenuResult::Start => {}
            }
        }

        // Pick up any resize that happened while the menu was up.
        let (width, height) = terminal::size()?;
        canvas = TerminalCanvas::for_terminal(width, height);
        session.resize(canvas.viewport());
        session.perception_mut().resize(canvas.cols(), canvas.rows());

        if let Err(e) = session.start() {
            last_error = Some(e.to_string());
            restart = false;
            continue;
        }
        last_error = None;

        let outcome = game_loop(out, &mut session, &mut canvas, rx, clock)?;
        session.perception_mut().stop();
        match outcome {
            Outcome::Quit => break,
            Outcome::Restart => restart = true,
        }
    }
    Ok(())
}
