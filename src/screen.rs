//! Top-level screen state machine.
//!
//! `update` is called once per frame.  It decides which screen logic runs:
//! the Playing screen hands off to `compute::tick`, the menu screens read
//! navigation keys gated by a shared 200 ms cooldown, and the level-up
//! banner counts itself down.

use rand::Rng;

use crate::compute::{self, TickInput};
use crate::entities::{ScreenState, SoundEvent, LEVEL_UP_BLINK, LEVEL_UP_DURATION};
use crate::session::GameSession;

// ── Menu entries ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainMenuItem {
    StartGame,
    LoadSavedGame,
    Instructions,
    Exit,
}

pub const MAIN_MENU: [MainMenuItem; 4] = [
    MainMenuItem::StartGame,
    MainMenuItem::LoadSavedGame,
    MainMenuItem::Instructions,
    MainMenuItem::Exit,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseMenuItem {
    Resume,
    Restart,
    SaveAndQuit,
}

pub const PAUSE_MENU: [PauseMenuItem; 3] = [
    PauseMenuItem::Resume,
    PauseMenuItem::Restart,
    PauseMenuItem::SaveAndQuit,
];

/// Entries shared by the game-over and victory screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndMenuItem {
    Restart,
    MainMenu,
}

pub const END_MENU: [EndMenuItem; 2] = [EndMenuItem::Restart, EndMenuItem::MainMenu];

impl MainMenuItem {
    pub fn label(self) -> &'static str {
        match self {
            MainMenuItem::StartGame => "Start Game",
            MainMenuItem::LoadSavedGame => "Load Saved Game",
            MainMenuItem::Instructions => "Instructions",
            MainMenuItem::Exit => "Exit",
        }
    }
}

impl PauseMenuItem {
    pub fn label(self) -> &'static str {
        match self {
            PauseMenuItem::Resume => "Resume",
            PauseMenuItem::Restart => "Restart",
            PauseMenuItem::SaveAndQuit => "Save & Quit",
        }
    }
}

impl EndMenuItem {
    pub fn label(self) -> &'static str {
        match self {
            EndMenuItem::Restart => "Restart",
            EndMenuItem::MainMenu => "Main Menu",
        }
    }
}

/// Number of entries in the menu shown on `screen` (0 if none).
pub fn menu_len(screen: ScreenState) -> usize {
    match screen {
        ScreenState::Menu => MAIN_MENU.len(),
        ScreenState::Paused => PAUSE_MENU.len(),
        ScreenState::GameOver | ScreenState::Victory => END_MENU.len(),
        ScreenState::Playing | ScreenState::Instructions | ScreenState::LevelUp => 0,
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Advance whichever screen is active by `dt` seconds.
pub fn update(session: &mut GameSession, input: &TickInput, dt: f32, rng: &mut impl Rng) {
    session.cooldowns.menu.advance(dt);

    match session.screen {
        ScreenState::Menu => main_menu(session, input),
        ScreenState::Playing => compute::tick(session, input, dt, rng),
        ScreenState::Instructions => instructions(session, input),
        ScreenState::LevelUp => level_up(session, dt),
        ScreenState::Paused => pause_menu(session, input),
        ScreenState::GameOver | ScreenState::Victory => end_menu(session, input),
    }
}

/// What a menu screen should do this frame.
enum MenuAction {
    None,
    Moved,
    Confirm(usize),
}

/// Shared up/down/enter handling.  Moving the cursor wraps around.
fn navigate(session: &mut GameSession, input: &TickInput) -> MenuAction {
    if !session.cooldowns.menu.ready() {
        return MenuAction::None;
    }
    let len = menu_len(session.screen);
    if len == 0 {
        return MenuAction::None;
    }

    let action = if input.up {
        session.menu_cursor = (session.menu_cursor + len - 1) % len;
        session.emit(SoundEvent::MenuNav);
        MenuAction::Moved
    } else if input.down {
        session.menu_cursor = (session.menu_cursor + 1) % len;
        session.emit(SoundEvent::MenuNav);
        MenuAction::Moved
    } else if input.confirm {
        session.emit(SoundEvent::MenuClick);
        MenuAction::Confirm(session.menu_cursor.min(len - 1))
    } else {
        MenuAction::None
    };

    if !matches!(action, MenuAction::None) {
        session.cooldowns.menu.trigger();
    }
    action
}

fn to_main_menu(session: &mut GameSession) {
    session.screen = ScreenState::Menu;
    session.menu_cursor = 0;
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn main_menu(session: &mut GameSession, input: &TickInput) {
    let MenuAction::Confirm(idx) = navigate(session, input) else {
        return;
    };
    match MAIN_MENU[idx] {
        MainMenuItem::StartGame => session.start_new_game(),
        MainMenuItem::LoadSavedGame => {
            if !session.resume_saved_game() {
                log::debug!("No saved game to load");
            }
        }
        MainMenuItem::Instructions => session.screen = ScreenState::Instructions,
        MainMenuItem::Exit => {
            log::info!("Exit selected");
            session.quit = true;
        }
    }
}

fn instructions(session: &mut GameSession, input: &TickInput) {
    if input.back && session.cooldowns.menu.ready() {
        session.emit(SoundEvent::MenuClick);
        to_main_menu(session);
        session.cooldowns.menu.trigger();
    }
}

fn level_up(session: &mut GameSession, dt: f32) {
    let banner = &mut session.level_up;
    banner.elapsed += dt;
    banner.blink_elapsed += dt;
    if banner.blink_elapsed >= LEVEL_UP_BLINK {
        banner.visible = !banner.visible;
        banner.blink_elapsed = 0.0;
    }
    if banner.elapsed >= LEVEL_UP_DURATION {
        session.screen = ScreenState::Playing;
        session.clocks.reset();
        log::debug!("Level {} begins", session.player.level);
    }
}

fn pause_menu(session: &mut GameSession, input: &TickInput) {
    if input.pause && session.cooldowns.menu.ready() {
        session.screen = ScreenState::Playing;
        session.cooldowns.menu.trigger();
        log::info!("Resumed");
        return;
    }
    let MenuAction::Confirm(idx) = navigate(session, input) else {
        return;
    };
    match PAUSE_MENU[idx] {
        PauseMenuItem::Resume => {
            session.screen = ScreenState::Playing;
            log::info!("Resumed");
        }
        PauseMenuItem::Restart => session.restart_level(),
        PauseMenuItem::SaveAndQuit => {
            let record = session.snapshot_record();
            session.saved_game = record.is_resumable().then_some(record);
            session.pending_save = Some(record);
            to_main_menu(session);
            log::info!("Saved game at level {} and quit", record.level);
        }
    }
}

fn end_menu(session: &mut GameSession, input: &TickInput) {
    let MenuAction::Confirm(idx) = navigate(session, input) else {
        return;
    };
    match END_MENU[idx] {
        EndMenuItem::Restart => session.start_new_game(),
        EndMenuItem::MainMenu => to_main_menu(session),
    }
}
