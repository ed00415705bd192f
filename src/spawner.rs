//! When and where new meteors, enemies, bosses and shield power-ups appear.
//!
//! Each kind keeps its own clock.  When it elapses one spawn is attempted at
//! row 0 of a random column and the next delay is rolled, whether or not the
//! attempt succeeded.  Random offsets are whole seconds: the variance is
//! truncated toward zero before rolling.

use rand::Rng;

use crate::entities::{EntityKind, COLS};
use crate::session::GameSession;

/// First level at which bosses and shield power-ups show up.
pub const BOSS_LEVEL: u32 = 3;

// ── Delay tables ──────────────────────────────────────────────────────────────

/// `base + randint[0, trunc(variance))` seconds.
fn roll(base: f32, variance: f32, rng: &mut impl Rng) -> f32 {
    let span = (variance as u32).max(1);
    base + rng.gen_range(0..span) as f32
}

pub fn meteor_delay(rng: &mut impl Rng) -> f32 {
    roll(1.0, 3.0, rng)
}

pub fn enemy_delay(level: u32, rng: &mut impl Rng) -> f32 {
    let base = (2.0 - level as f32 * 0.35).max(0.5);
    let variance = (2.5 - level as f32 * 0.35).max(1.0);
    roll(base, variance, rng)
}

pub fn boss_delay(level: u32, rng: &mut impl Rng) -> f32 {
    let base = (10.0 - (level as f32 - 3.0) * 1.5).max(5.0);
    roll(base, 4.0, rng)
}

pub fn shield_delay(level: u32, rng: &mut impl Rng) -> f32 {
    if level < 5 {
        roll(20.0, 15.0, rng)
    } else {
        roll(12.0, 8.0, rng)
    }
}

/// Delays used when a session is created: (meteor, enemy, boss, shield).
pub fn initial_delays(rng: &mut impl Rng) -> (f32, f32, f32, f32) {
    (
        roll(1.0, 3.0, rng),
        roll(2.0, 4.0, rng),
        roll(8.0, 5.0, rng),
        roll(15.0, 10.0, rng),
    )
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Drop `kind` into a random top-row column if that cell is free.
fn try_spawn(session: &mut GameSession, kind: EntityKind, rng: &mut impl Rng) -> bool {
    let col = rng.gen_range(0..COLS);
    if session.grid.is_empty_at(0, col) {
        session.grid.set(0, col, kind);
        log::trace!("Spawned {:?} at column {}", kind, col);
        true
    } else {
        log::trace!("Skipped {:?} spawn, column {} occupied", kind, col);
        false
    }
}

/// Put a shield power-up in the first free pool slot.
fn try_spawn_shield(session: &mut GameSession, rng: &mut impl Rng) -> bool {
    if !session.shields.has_free_slot() {
        return false;
    }
    let col = rng.gen_range(0..COLS);
    session.shields.spawn(0, col)
}

/// Advance every spawn clock by `dt` and spawn whatever is due.
pub fn run(session: &mut GameSession, dt: f32, rng: &mut impl Rng) {
    let level = session.player.level;

    if session.clocks.meteor_spawn.advance(dt) {
        try_spawn(session, EntityKind::Meteor, rng);
        let next = meteor_delay(rng);
        session.clocks.meteor_spawn.set_interval(next);
    }

    if session.clocks.enemy_spawn.advance(dt) {
        try_spawn(session, EntityKind::Enemy, rng);
        let next = enemy_delay(level, rng);
        session.clocks.enemy_spawn.set_interval(next);
    }

    if level < BOSS_LEVEL {
        return;
    }

    if session.clocks.boss_spawn.advance(dt) {
        try_spawn(session, EntityKind::Boss, rng);
        let next = boss_delay(level, rng);
        session.clocks.boss_spawn.set_interval(next);
    }

    if session.clocks.shield_spawn.advance(dt) {
        try_spawn_shield(session, rng);
        let next = shield_delay(level, rng);
        session.clocks.shield_spawn.set_interval(next);
    }
}
