//! Score, kills, lives, shield and invincibility, and the level-up /
//! victory / game-over decisions that follow from them.

use rand::Rng;

use crate::entities::{EntityKind, ScreenState, SoundEvent, MAX_LEVEL};
use crate::save::SaveRecord;
use crate::session::{GameSession, LevelUpDisplay};

/// How a hit on the ship played out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Ship was invincible; nothing changed.
    Ignored,
    /// Shield took the hit.
    Absorbed,
    LifeLost,
}

// ── Scoring table ─────────────────────────────────────────────────────────────

/// Points for destroying `kind`.  Meteors are worth 1 or 2 at random.
pub fn score_for(kind: EntityKind, rng: &mut impl Rng) -> u32 {
    match kind {
        EntityKind::Meteor => rng.gen_range(1..=2),
        EntityKind::Enemy => 3,
        EntityKind::Boss => 5,
        _ => 0,
    }
}

/// Whether destroying `kind` counts toward the level's kill threshold.
pub fn counts_as_kill(kind: EntityKind) -> bool {
    matches!(kind, EntityKind::Enemy | EntityKind::Boss)
}

pub fn kills_needed(level: u32) -> u32 {
    level * 10
}

// ── Hits ──────────────────────────────────────────────────────────────────────

fn grant_invincibility(session: &mut GameSession) {
    session.player.is_invincible = true;
    session.player.invincibility_elapsed = 0.0;
}

/// The one place a collision with the ship is resolved.
pub fn take_hit(session: &mut GameSession) -> HitOutcome {
    if session.player.is_invincible {
        return HitOutcome::Ignored;
    }
    grant_invincibility(session);
    if session.player.has_shield {
        session.player.has_shield = false;
        session.emit(SoundEvent::Explosion);
        log::debug!("Shield absorbed a hit");
        return HitOutcome::Absorbed;
    }
    lose_life(session);
    HitOutcome::LifeLost
}

/// An enemy or boss got past the ship.  Shield and invincibility don't help.
pub fn escape_penalty(session: &mut GameSession) {
    grant_invincibility(session);
    lose_life(session);
}

fn lose_life(session: &mut GameSession) {
    session.player.lives = session.player.lives.saturating_sub(1);
    session.emit(SoundEvent::Damage);
    log::debug!("Life lost, {} left", session.player.lives);
    if session.player.lives == 0 && session.screen == ScreenState::Playing {
        game_over(session);
    }
}

/// Count down the invincibility window.
pub fn update_invincibility(session: &mut GameSession, dt: f32) {
    if !session.player.is_invincible {
        return;
    }
    session.player.invincibility_elapsed += dt;
    if session.player.invincibility_elapsed >= session.config.invincibility_secs {
        session.player.is_invincible = false;
        session.player.invincibility_elapsed = 0.0;
    }
}

// ── Kills & levels ────────────────────────────────────────────────────────────

/// Credit the player for destroying `victim`.
pub fn award(session: &mut GameSession, victim: EntityKind, rng: &mut impl Rng) {
    session.player.score += score_for(victim, rng);
    if counts_as_kill(victim) {
        session.player.kill_count += 1;
        check_level_progress(session);
    }
}

/// Level up or win once the kill threshold for the current level is met.
pub fn check_level_progress(session: &mut GameSession) {
    let level = session.player.level;
    if session.player.kill_count < kills_needed(level) {
        return;
    }
    if level < MAX_LEVEL {
        level_up(session);
    } else {
        victory(session);
    }
}

fn level_up(session: &mut GameSession) {
    session.player.level += 1;
    session.player.kill_count = 0;
    session.boss_move_count = 0;
    session.grid.clear_entities();
    session.recenter_ship();
    session.level_up = LevelUpDisplay::default();
    session.screen = ScreenState::LevelUp;
    session.emit(SoundEvent::LevelUp);
    log::info!("Level up! Now on level {}", session.player.level);
}

/// Bank the high score and drop any saved game.
fn record_final_score(session: &mut GameSession) {
    session.high_score = session.high_score.max(session.player.score);
    session.saved_game = None;
    session.pending_save = Some(SaveRecord::cleared(session.high_score));
}

fn victory(session: &mut GameSession) {
    record_final_score(session);
    session.screen = ScreenState::Victory;
    session.menu_cursor = 0;
    session.emit(SoundEvent::Win);
    log::info!("Victory with score {}", session.player.score);
}

fn game_over(session: &mut GameSession) {
    record_final_score(session);
    session.screen = ScreenState::GameOver;
    session.menu_cursor = 0;
    session.emit(SoundEvent::Lose);
    log::info!("Game over with score {}", session.player.score);
}
