mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_shooter::config::{Config, DEFAULT_CONFIG_FILE};
use space_shooter::entities::SoundEvent;
use space_shooter::{save, screen, GameSession, TickInput};

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is refreshed before it expires.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Returns true if any of `keys` was seen within the last `HOLD_WINDOW`.
fn is_held(key_seen: &HashMap<KeyCode, Instant>, keys: &[KeyCode], now: Instant) -> bool {
    keys.iter().any(|key| {
        key_seen
            .get(key)
            .map(|&last| now.duration_since(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

fn read_input(key_seen: &HashMap<KeyCode, Instant>, now: Instant) -> TickInput {
    let held = |keys: &[KeyCode]| is_held(key_seen, keys, now);
    TickInput {
        left: held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        fire: held(&[KeyCode::Char(' ')]),
        pause: held(&[KeyCode::Char('p'), KeyCode::Char('P')]),
        up: held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
        down: held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        confirm: held(&[KeyCode::Enter]),
        back: held(&[KeyCode::Esc, KeyCode::Backspace]),
    }
}

// ── Audio stand-in ────────────────────────────────────────────────────────────

/// No audio backend in the terminal: ring the bell for explosions and damage,
/// log everything.
fn play_sounds<W: Write>(out: &mut W, sounds: &[SoundEvent]) -> std::io::Result<()> {
    for sound in sounds {
        log::debug!("sound: {:?}", sound);
    }
    if sounds
        .iter()
        .any(|s| matches!(s, SoundEvent::Explosion | SoundEvent::Damage))
    {
        out.write_all(b"\x07")?;
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player picks Exit or presses Ctrl-C.
///
/// Input model: instead of acting on each key event individually, we keep
/// the time each key was last pressed or repeated.  Every frame the keys
/// still "fresh" become one `TickInput`, so Space and A/D can be held
/// together.  On keyboard-enhancement terminals release events remove keys
/// immediately; elsewhere they expire after `HOLD_WINDOW`.
fn run<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let frame = Duration::from_secs_f32(1.0 / session.config.frame_rate.max(1) as f32);
    let mut key_seen: HashMap<KeyCode, Instant> = HashMap::new();
    let mut last = Instant::now();

    while !session.quit {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last).as_secs_f32();
        last = frame_start;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                    key_seen.insert(code, frame_start);
                }
                KeyEventKind::Release => {
                    key_seen.remove(&code);
                }
            }
        }

        let input = read_input(&key_seen, frame_start);
        screen::update(session, &input, dt, rng);

        play_sounds(out, &session.drain_sounds())?;
        if let Some(record) = session.take_pending_save() {
            // A failed write only loses progress.
            if let Err(e) = save::store(&session.config.save_path, &record) {
                log::warn!("Could not write save file: {}", e);
            }
        }

        let (width, height) = terminal::size()?;
        display::render(out, session, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = Config::load_or_default(&config_path);
    let record = save::load_or_default(&config.save_path);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::new(config, record, &mut rng);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    log::info!("Space shooter starting");
    let result = run(&mut out, &mut session, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
