//! Game entity types and board constants — pure data, no logic.

// ── Board & rule constants ────────────────────────────────────────────────────

pub const ROWS: usize = 23;
pub const COLS: usize = 15;

/// Bottom row, where the ship lives.
pub const SHIP_ROW: usize = ROWS - 1;

pub const STARTING_LIVES: u32 = 3;
pub const MAX_LEVEL: u32 = 5;

pub const MAX_SHIELD_POWERUPS: usize = 5;
pub const MAX_HIT_EFFECTS: usize = 50;

/// Seconds an explosion stays on screen.
pub const HIT_EFFECT_DURATION: f32 = 0.3;

/// Seconds the level-up banner is shown before play resumes.
pub const LEVEL_UP_DURATION: f32 = 2.0;
/// Seconds between level-up banner blink toggles.
pub const LEVEL_UP_BLINK: f32 = 0.3;

// ── Grid contents ─────────────────────────────────────────────────────────────

/// What occupies a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntityKind {
    #[default]
    Empty,
    Ship,
    Meteor,
    /// Player projectile, travels upward.
    Bullet,
    Enemy,
    Boss,
    /// Boss projectile, travels downward.
    BossBullet,
}

impl EntityKind {
    /// Kinds that hurt the ship on contact.
    pub fn is_hostile(self) -> bool {
        matches!(
            self,
            EntityKind::Meteor | EntityKind::Enemy | EntityKind::Boss | EntityKind::BossBullet
        )
    }
}

// ── Screens ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScreenState {
    #[default]
    Menu,
    Playing,
    Instructions,
    LevelUp,
    Paused,
    GameOver,
    Victory,
}

// ── Pools ─────────────────────────────────────────────────────────────────────

/// A falling shield pick-up.  Lives outside the grid so it never collides
/// with grid entities.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShieldPowerup {
    pub row: usize,
    pub col: usize,
    pub active: bool,
}

/// A short-lived explosion marker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HitEffect {
    pub row: usize,
    pub col: usize,
    pub elapsed: f32,
    pub active: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub lives: u32,
    pub score: u32,
    /// Enemies and bosses destroyed on the current level.
    pub kill_count: u32,
    pub level: u32,
    pub has_shield: bool,
    pub is_invincible: bool,
    pub invincibility_elapsed: f32,
    pub ship_col: usize,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            lives: STARTING_LIVES,
            score: 0,
            kill_count: 0,
            level: 1,
            has_shield: false,
            is_invincible: false,
            invincibility_elapsed: 0.0,
            ship_col: COLS / 2,
        }
    }
}

// ── Audio contract ────────────────────────────────────────────────────────────

/// Audio-worthy moments.  The core only queues these; playback is up to the
/// front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEvent {
    Shoot,
    Explosion,
    Damage,
    LevelUp,
    Pickup,
    MenuNav,
    MenuClick,
    Win,
    Lose,
}
