//! The single owner of all game state.
//!
//! One `GameSession` lives as long as the program; the screen state machine
//! and every simulation component borrow it mutably in turn.

use rand::Rng;

use crate::cadence::{Cadence, Cooldown};
use crate::compute;
use crate::config::Config;
use crate::entities::{
    EntityKind, PlayerState, ScreenState, SoundEvent, COLS, MAX_LEVEL, SHIP_ROW,
};
use crate::grid::{Grid, HitEffectPool, ShieldPool};
use crate::save::SaveRecord;
use crate::spawner;

// ── Clocks ────────────────────────────────────────────────────────────────────

/// Spawn and movement clocks, one per entity kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Clocks {
    pub meteor_spawn: Cadence,
    pub enemy_spawn: Cadence,
    pub boss_spawn: Cadence,
    pub shield_spawn: Cadence,
    pub meteor_move: Cadence,
    pub enemy_move: Cadence,
    pub boss_move: Cadence,
    pub boss_bullet_move: Cadence,
    pub bullet_move: Cadence,
    pub shield_move: Cadence,
}

impl Clocks {
    pub fn new(rng: &mut impl Rng) -> Self {
        let (meteor, enemy, boss, shield) = spawner::initial_delays(rng);
        Self {
            meteor_spawn: Cadence::new(meteor),
            enemy_spawn: Cadence::new(enemy),
            boss_spawn: Cadence::new(boss),
            shield_spawn: Cadence::new(shield),
            meteor_move: Cadence::new(compute::descent_interval(1)),
            enemy_move: Cadence::new(compute::descent_interval(1)),
            boss_move: Cadence::new(compute::boss_move_interval(1)),
            boss_bullet_move: Cadence::new(compute::BOSS_BULLET_INTERVAL),
            bullet_move: Cadence::new(compute::BULLET_INTERVAL),
            shield_move: Cadence::new(compute::SHIELD_MOVE_INTERVAL),
        }
    }

    /// Restart every clock.  Pending spawn delays are kept.
    pub fn reset(&mut self) {
        for clock in [
            &mut self.meteor_spawn,
            &mut self.enemy_spawn,
            &mut self.boss_spawn,
            &mut self.shield_spawn,
            &mut self.meteor_move,
            &mut self.enemy_move,
            &mut self.boss_move,
            &mut self.boss_bullet_move,
            &mut self.bullet_move,
            &mut self.shield_move,
        ] {
            clock.reset();
        }
    }
}

// ── Input cooldowns ───────────────────────────────────────────────────────────

pub const MOVE_COOLDOWN: f32 = 0.1;
pub const FIRE_COOLDOWN: f32 = 0.3;
pub const MENU_COOLDOWN: f32 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub struct Cooldowns {
    pub movement: Cooldown,
    pub fire: Cooldown,
    pub menu: Cooldown,
}

impl Default for Cooldowns {
    fn default() -> Self {
        Self {
            movement: Cooldown::new(MOVE_COOLDOWN),
            fire: Cooldown::new(FIRE_COOLDOWN),
            menu: Cooldown::new(MENU_COOLDOWN),
        }
    }
}

/// Timer and blink phase of the level-up banner.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelUpDisplay {
    pub elapsed: f32,
    pub blink_elapsed: f32,
    pub visible: bool,
}

impl Default for LevelUpDisplay {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            blink_elapsed: 0.0,
            visible: true,
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameSession {
    pub config: Config,
    pub screen: ScreenState,
    /// Highlighted entry of whichever menu is on screen.
    pub menu_cursor: usize,
    pub grid: Grid,
    pub shields: ShieldPool,
    pub effects: HitEffectPool,
    pub player: PlayerState,
    pub high_score: u32,
    /// Game that "Load Saved Game" would resume, if any.
    pub saved_game: Option<SaveRecord>,
    /// Boss sweeps since the last volley.
    pub boss_move_count: u32,
    pub clocks: Clocks,
    pub cooldowns: Cooldowns,
    pub level_up: LevelUpDisplay,
    /// Sounds raised since the front end last drained them.
    pub sounds: Vec<SoundEvent>,
    /// Record the front end should write to disk.
    pub pending_save: Option<SaveRecord>,
    /// Set when the player picks Exit.
    pub quit: bool,
}

impl GameSession {
    /// A session sitting on the main menu, seeded from the save file.
    pub fn new(config: Config, save: SaveRecord, rng: &mut impl Rng) -> Self {
        let mut session = Self {
            config,
            screen: ScreenState::Menu,
            menu_cursor: 0,
            grid: Grid::new(),
            shields: ShieldPool::default(),
            effects: HitEffectPool::default(),
            player: PlayerState::default(),
            high_score: save.high_score,
            saved_game: save.is_resumable().then_some(save),
            boss_move_count: 0,
            clocks: Clocks::new(rng),
            cooldowns: Cooldowns::default(),
            level_up: LevelUpDisplay::default(),
            sounds: Vec::new(),
            pending_save: None,
            quit: false,
        };
        session.place_ship();
        session
    }

    pub fn emit(&mut self, sound: SoundEvent) {
        self.sounds.push(sound);
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.sounds)
    }

    pub fn take_pending_save(&mut self) -> Option<SaveRecord> {
        self.pending_save.take()
    }

    pub fn place_ship(&mut self) {
        self.grid.set(SHIP_ROW, self.player.ship_col, EntityKind::Ship);
    }

    /// Move the ship back to the middle of the bottom row.
    pub fn recenter_ship(&mut self) {
        if self.grid.get(SHIP_ROW, self.player.ship_col) == EntityKind::Ship {
            self.grid.clear_cell(SHIP_ROW, self.player.ship_col);
        }
        self.player.ship_col = COLS / 2;
        self.grid.clear_cell(SHIP_ROW, self.player.ship_col);
        self.place_ship();
    }

    /// Empty board, fresh clocks, ship centred, shield and invincibility off.
    fn reset_board(&mut self) {
        self.grid.clear_all();
        self.shields.clear();
        self.effects.clear();
        self.player.ship_col = COLS / 2;
        self.place_ship();
        self.player.is_invincible = false;
        self.player.invincibility_elapsed = 0.0;
        self.boss_move_count = 0;
        self.clocks.reset();
    }

    /// Brand-new game from level 1.
    pub fn start_new_game(&mut self) {
        self.player = PlayerState::default();
        self.reset_board();
        self.screen = ScreenState::Playing;
        log::info!("New game started");
    }

    /// Resume the saved game.  Returns false when there is nothing to resume.
    pub fn resume_saved_game(&mut self) -> bool {
        let Some(saved) = self.saved_game else {
            return false;
        };
        self.player = PlayerState {
            lives: saved.lives,
            score: saved.score,
            level: saved.level.min(MAX_LEVEL),
            ..PlayerState::default()
        };
        self.reset_board();
        self.screen = ScreenState::Playing;
        log::info!(
            "Resumed saved game at level {} ({} lives, score {})",
            saved.level,
            saved.lives,
            saved.score
        );
        true
    }

    /// Replay the current level: score and kills go back to zero, level,
    /// lives and shield carry over.
    pub fn restart_level(&mut self) {
        self.player.score = 0;
        self.player.kill_count = 0;
        self.reset_board();
        self.screen = ScreenState::Playing;
        log::info!("Restarted level {}", self.player.level);
    }

    /// Snapshot of the live game for "Save & Quit".
    pub fn snapshot_record(&self) -> SaveRecord {
        SaveRecord {
            high_score: self.high_score,
            lives: self.player.lives,
            score: self.player.score,
            level: self.player.level,
        }
    }
}
