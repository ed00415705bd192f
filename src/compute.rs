//! Per-frame simulation for the Playing screen.
//!
//! Every entity kind moves on its own clock.  When a clock fires, the whole
//! grid is swept once for that kind and each entity steps one cell.  What
//! happens when it steps into an occupied cell is decided by a single rule
//! table, [`resolve`]; [`sweep`] is the only driver that applies it.
//! All randomness comes through the injected `rng`.

use rand::Rng;

use crate::entities::{EntityKind, ScreenState, SoundEvent, COLS, ROWS, SHIP_ROW};
use crate::progression;
use crate::session::GameSession;
use crate::spawner;

// ── Cadences ──────────────────────────────────────────────────────────────────

/// Seconds between player-bullet sweeps.
pub const BULLET_INTERVAL: f32 = 0.05;
/// Seconds between boss-bullet sweeps, the same on every level.
pub const BOSS_BULLET_INTERVAL: f32 = 0.15;
pub const SHIELD_MOVE_INTERVAL: f32 = 0.5;

/// Meteor and enemy step interval.  Shrinks by 0.1 s per level.
pub fn descent_interval(level: u32) -> f32 {
    (0.833 - (level as f32 - 1.0) * 0.1).max(0.333)
}

pub fn boss_move_interval(level: u32) -> f32 {
    (0.8 - (level as f32 - 3.0) * 0.1).max(0.5)
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Keys held down during this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub pause: bool,
    pub up: bool,
    pub down: bool,
    pub confirm: bool,
    pub back: bool,
}

// ── Collision rules ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

/// Direction of travel for kinds that move through the grid.
pub fn direction_of(kind: EntityKind) -> Option<Direction> {
    match kind {
        EntityKind::Meteor | EntityKind::Enemy | EntityKind::Boss | EntityKind::BossBullet => {
            Some(Direction::Down)
        }
        EntityKind::Bullet => Some(Direction::Up),
        EntityKind::Empty | EntityKind::Ship => None,
    }
}

/// Result of `mover` stepping into a cell holding `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Target cell is free.
    Advance,
    /// Mover passes over the target, which survives underneath.
    Overlay,
    /// Mover takes the cell; the target vanishes without credit.
    Absorb,
    /// Mover waits this sweep.
    Blocked,
    /// Mover is spent on the ship.
    HitShip,
    /// Bullet and obstacle destroy each other; `victim` is the one scored.
    Destroy { victim: EntityKind },
}

pub fn resolve(mover: EntityKind, target: EntityKind) -> Outcome {
    use EntityKind::*;
    match (mover, target) {
        (_, Empty) => Outcome::Advance,
        (Meteor | Enemy | Boss | BossBullet, Ship) => Outcome::HitShip,
        (Meteor | Enemy | Boss | BossBullet, Bullet) => Outcome::Destroy { victim: mover },
        (Bullet, Meteor | Enemy | Boss | BossBullet) => Outcome::Destroy { victim: target },
        (Boss | BossBullet, Meteor | Enemy) => Outcome::Overlay,
        (Boss, BossBullet) => Outcome::Absorb,
        _ => Outcome::Blocked,
    }
}

/// Whether leaving the board at the bottom costs a life.
fn escape_costs_life(kind: EntityKind) -> bool {
    matches!(kind, EntityKind::Enemy | EntityKind::Boss)
}

// ── Sweep driver ──────────────────────────────────────────────────────────────

/// Move every `kind` on the grid one step.
///
/// Downward movers are visited bottom row first and the player's bullets top
/// row first, so nothing moves twice in one sweep.  Stops early if a
/// collision ends play (level-up, victory, game over).
pub fn sweep(session: &mut GameSession, kind: EntityKind, rng: &mut impl Rng) {
    let Some(direction) = direction_of(kind) else {
        return;
    };
    let rows: Vec<usize> = match direction {
        Direction::Down => (0..ROWS).rev().collect(),
        Direction::Up => (0..ROWS).collect(),
    };
    for row in rows {
        for col in 0..COLS {
            if session.screen != ScreenState::Playing {
                return;
            }
            if session.grid.get(row, col) == kind {
                step(session, kind, direction, row, col, rng);
            }
        }
    }
}

fn step(
    session: &mut GameSession,
    kind: EntityKind,
    direction: Direction,
    row: usize,
    col: usize,
    rng: &mut impl Rng,
) {
    let next_row = match direction {
        Direction::Down if row + 1 < ROWS => row + 1,
        Direction::Up if row > 0 => row - 1,
        _ => {
            // Off the edge.
            session.grid.vacate(row, col);
            if escape_costs_life(kind) {
                log::debug!("{:?} escaped at column {}", kind, col);
                progression::escape_penalty(session);
            }
            return;
        }
    };

    let target = session.grid.get(next_row, col);
    match resolve(kind, target) {
        Outcome::Advance | Outcome::Absorb => {
            session.grid.vacate(row, col);
            session.grid.set(next_row, col, kind);
        }
        Outcome::Overlay => {
            session.grid.vacate(row, col);
            session.grid.overlay(next_row, col, kind);
        }
        Outcome::Blocked => {}
        Outcome::HitShip => {
            session.grid.vacate(row, col);
            session.effects.spawn(next_row, col);
            progression::take_hit(session);
        }
        Outcome::Destroy { victim } => {
            session.grid.vacate(row, col);
            session.grid.vacate(next_row, col);
            session.effects.spawn(next_row, col);
            session.emit(SoundEvent::Explosion);
            progression::award(session, victim, rng);
        }
    }
}

// ── Bosses ────────────────────────────────────────────────────────────────────

/// Every boss fires one bullet into the cell below it, if that cell is free.
pub fn fire_boss_bullets(session: &mut GameSession) {
    let bosses: Vec<(usize, usize)> = session.grid.positions(EntityKind::Boss).collect();
    for (row, col) in bosses {
        if row + 1 < ROWS && session.grid.is_empty_at(row + 1, col) {
            session.grid.set(row + 1, col, EntityKind::BossBullet);
        }
    }
}

/// One boss sweep plus the volley bookkeeping that rides on it.
fn boss_turn(session: &mut GameSession, rng: &mut impl Rng) {
    sweep(session, EntityKind::Boss, rng);
    if session.screen != ScreenState::Playing {
        return;
    }
    session.boss_move_count += 1;
    if session.boss_move_count >= session.config.boss_fire_interval(session.player.level) {
        fire_boss_bullets(session);
        session.boss_move_count = 0;
    }
}

// ── Shield power-ups ──────────────────────────────────────────────────────────

fn pick_up_shield(session: &mut GameSession, slot: usize) {
    if !session.player.has_shield {
        session.player.has_shield = true;
    }
    session.shields.slots[slot].active = false;
    session.emit(SoundEvent::Pickup);
    log::debug!("Shield picked up");
}

fn touches_ship(session: &GameSession, row: usize, col: usize) -> bool {
    row == SHIP_ROW && col == session.player.ship_col
}

/// Drop every active power-up one row, collecting any that touch the ship.
pub fn advance_shield_powerups(session: &mut GameSession, rng: &mut impl Rng) {
    let zigzag = session.config.shield_zigzag;
    for slot in 0..session.shields.slots.len() {
        let p = session.shields.slots[slot];
        if !p.active {
            continue;
        }
        if touches_ship(session, p.row, p.col) {
            pick_up_shield(session, slot);
            continue;
        }
        if p.row >= SHIP_ROW {
            session.shields.slots[slot].active = false;
            continue;
        }

        let row = p.row + 1;
        let mut col = p.col;
        if zigzag {
            match rng.gen_range(0..3) {
                0 if col > 0 => col -= 1,
                2 if col < COLS - 1 => col += 1,
                _ => {}
            }
        }
        session.shields.slots[slot].row = row;
        session.shields.slots[slot].col = col;

        if touches_ship(session, row, col) {
            pick_up_shield(session, slot);
        }
    }
}

// ── Player actions ────────────────────────────────────────────────────────────

/// Slide the ship one column.  Running into something hostile counts as
/// being hit by it.
fn shift_ship(session: &mut GameSession, delta: isize) -> bool {
    let from = session.player.ship_col;
    let to = match from.checked_add_signed(delta) {
        Some(to) if to < COLS => to,
        _ => return false,
    };

    let occupant = session.grid.get(SHIP_ROW, to);
    session.grid.clear_cell(SHIP_ROW, from);
    session.grid.clear_cell(SHIP_ROW, to);
    session.player.ship_col = to;
    session.place_ship();

    if occupant.is_hostile() {
        session.effects.spawn(SHIP_ROW, to);
        progression::take_hit(session);
    }
    true
}

pub fn move_ship_left(session: &mut GameSession) -> bool {
    shift_ship(session, -1)
}

pub fn move_ship_right(session: &mut GameSession) -> bool {
    shift_ship(session, 1)
}

/// Put a bullet directly above the ship if that cell is free.
pub fn fire(session: &mut GameSession) -> bool {
    let (row, col) = (SHIP_ROW - 1, session.player.ship_col);
    if session.grid.is_empty_at(row, col) {
        session.grid.set(row, col, EntityKind::Bullet);
        session.emit(SoundEvent::Shoot);
        true
    } else {
        false
    }
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the Playing screen by `dt` seconds.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32, rng: &mut impl Rng) {
    if session.screen != ScreenState::Playing {
        return;
    }

    // ── 1. Pause ─────────────────────────────────────────────────────────────
    if input.pause && session.cooldowns.menu.ready() {
        session.screen = ScreenState::Paused;
        session.menu_cursor = 0;
        session.cooldowns.menu.trigger();
        log::info!("Paused");
        return;
    }

    // ── 2. Ship movement & firing ────────────────────────────────────────────
    session.cooldowns.movement.advance(dt);
    session.cooldowns.fire.advance(dt);

    if session.cooldowns.movement.ready() {
        let moved = if input.left {
            move_ship_left(session)
        } else if input.right {
            move_ship_right(session)
        } else {
            false
        };
        if moved {
            session.cooldowns.movement.trigger();
        }
    }
    if session.screen != ScreenState::Playing {
        return;
    }

    if input.fire && session.cooldowns.fire.ready() {
        fire(session);
        session.cooldowns.fire.trigger();
    }

    // ── 3. Spawning ──────────────────────────────────────────────────────────
    spawner::run(session, dt, rng);

    // ── 4. Movement sweeps ───────────────────────────────────────────────────
    let level = session.player.level;
    session.clocks.meteor_move.set_interval(descent_interval(level));
    session.clocks.enemy_move.set_interval(descent_interval(level));
    session.clocks.boss_move.set_interval(boss_move_interval(level));

    if session.clocks.meteor_move.advance(dt) {
        sweep(session, EntityKind::Meteor, rng);
    }
    if session.screen == ScreenState::Playing && session.clocks.shield_move.advance(dt) {
        advance_shield_powerups(session, rng);
    }
    if session.screen == ScreenState::Playing && session.clocks.enemy_move.advance(dt) {
        sweep(session, EntityKind::Enemy, rng);
    }
    if session.screen == ScreenState::Playing && session.clocks.boss_move.advance(dt) {
        boss_turn(session, rng);
    }
    if session.screen == ScreenState::Playing && session.clocks.boss_bullet_move.advance(dt) {
        sweep(session, EntityKind::BossBullet, rng);
    }
    if session.screen == ScreenState::Playing && session.clocks.bullet_move.advance(dt) {
        sweep(session, EntityKind::Bullet, rng);
    }

    // ── 5. Timers ────────────────────────────────────────────────────────────
    session.effects.advance(dt);
    if session.screen == ScreenState::Playing {
        progression::update_invincibility(session, dt);
    }
}
