//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session.  No game logic is performed; this module only translates state
//! into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_shooter::entities::{EntityKind, ScreenState, COLS, MAX_LEVEL, ROWS};
use space_shooter::progression::kills_needed;
use space_shooter::screen::{END_MENU, MAIN_MENU, PAUSE_MENU};
use space_shooter::GameSession;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Terminal columns per grid cell.
const CELL_W: u16 = 2;
/// Screen row of the top border.
const BOARD_TOP: u16 = 1;
/// Width of the bordered board.
const BOARD_W: u16 = COLS as u16 * CELL_W + 2;
/// Column where the side panel starts.
const PANEL_X: u16 = BOARD_W + 3;

/// Seconds per on/off phase of the invincible ship.
const SHIP_BLINK: f32 = 0.1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_SHIP: Color = Color::White;
const C_SHIP_SHIELDED: Color = Color::Cyan;
const C_METEOR: Color = Color::DarkYellow;
const C_ENEMY: Color = Color::Green;
const C_BOSS: Color = Color::Red;
const C_BULLET: Color = Color::Cyan;
const C_BOSS_BULLET: Color = Color::Magenta;
const C_POWERUP: Color = Color::Cyan;
const C_EXPLOSION: Color = Color::Yellow;
const C_SELECTED: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for a terminal of `width` × `height`.
pub fn render<W: Write>(
    out: &mut W,
    session: &GameSession,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.screen {
        ScreenState::Menu => draw_main_menu(out, session, width, height)?,
        ScreenState::Instructions => draw_instructions(out, width)?,
        ScreenState::Playing => draw_game(out, session)?,
        ScreenState::LevelUp => {
            draw_game(out, session)?;
            if session.level_up.visible {
                let text = format!("LEVEL {}", session.player.level);
                draw_banner(out, &["LEVEL UP!", text.as_str()], Color::Green)?;
            }
        }
        ScreenState::Paused => {
            draw_game(out, session)?;
            draw_banner(out, &["PAUSED"], Color::White)?;
            let labels: Vec<&str> = PAUSE_MENU.iter().map(|i| i.label()).collect();
            draw_menu(out, &labels, session.menu_cursor, BOARD_W / 2, board_row(ROWS / 2))?;
        }
        ScreenState::GameOver | ScreenState::Victory => draw_end_screen(out, session)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn board_row(row: usize) -> u16 {
    BOARD_TOP + 1 + row as u16
}

fn board_col(col: usize) -> u16 {
    1 + col as u16 * CELL_W
}

fn centered<W: Write>(out: &mut W, cx: u16, row: u16, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(
        cx.saturating_sub(text.chars().count() as u16 / 2),
        row,
    ))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Playing field ─────────────────────────────────────────────────────────────

fn draw_game<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    draw_border(out)?;
    draw_cells(out, session)?;
    draw_powerups(out, session)?;
    draw_effects(out, session)?;
    draw_hud(out, session)?;
    draw_controls_hint(out)?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let inner = (BOARD_W - 2) as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, BOARD_TOP))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;

    out.queue(cursor::MoveTo(0, board_row(ROWS)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    for row in 0..ROWS {
        out.queue(cursor::MoveTo(0, board_row(row)))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(BOARD_W - 1, board_row(row)))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

/// Glyph and colour for a grid cell, `None` for empty cells.
fn sprite(kind: EntityKind, session: &GameSession) -> Option<(&'static str, Color)> {
    match kind {
        EntityKind::Empty => None,
        EntityKind::Ship => {
            let p = &session.player;
            let phase = (p.invincibility_elapsed / SHIP_BLINK) as u32;
            if p.is_invincible && phase % 2 == 1 {
                return None;
            }
            let color = if p.has_shield { C_SHIP_SHIELDED } else { C_SHIP };
            Some(("/\\", color))
        }
        EntityKind::Meteor => Some(("()", C_METEOR)),
        EntityKind::Bullet => Some((" ║", C_BULLET)),
        EntityKind::Enemy => Some(("«»", C_ENEMY)),
        EntityKind::Boss => Some(("[]", C_BOSS)),
        EntityKind::BossBullet => Some((" ↓", C_BOSS_BULLET)),
    }
}

fn draw_cells<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    for (r, row) in session.grid.rows().iter().enumerate() {
        for (c, &kind) in row.iter().enumerate() {
            if let Some((glyph, color)) = sprite(kind, session) {
                out.queue(cursor::MoveTo(board_col(c), board_row(r)))?;
                out.queue(style::SetForegroundColor(color))?;
                out.queue(Print(glyph))?;
            }
        }
    }
    Ok(())
}

fn draw_powerups<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_POWERUP))?;
    for p in session.shields.active() {
        out.queue(cursor::MoveTo(board_col(p.col), board_row(p.row)))?;
        out.queue(Print("<>"))?;
    }
    Ok(())
}

fn draw_effects<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_EXPLOSION))?;
    for e in session.effects.active() {
        out.queue(cursor::MoveTo(board_col(e.col), board_row(e.row)))?;
        out.queue(Print("**"))?;
    }
    Ok(())
}

// ── Side panel ────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    let p = &session.player;
    let mut row = BOARD_TOP + 1;

    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    for line in [
        format!("Score: {:>6}", p.score),
        format!("Best:  {:>6}", session.high_score.max(p.score)),
        format!("Level: {}/{}", p.level, MAX_LEVEL),
        format!("Kills: {}/{}", p.kill_count, kills_needed(p.level)),
    ] {
        out.queue(cursor::MoveTo(PANEL_X, row))?;
        out.queue(Print(line))?;
        row += 1;
    }

    row += 1;
    out.queue(cursor::MoveTo(PANEL_X, row))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {}", "♥".repeat(p.lives as usize))))?;

    if p.has_shield {
        row += 1;
        out.queue(cursor::MoveTo(PANEL_X, row))?;
        out.queue(style::SetForegroundColor(C_SHIP_SHIELDED))?;
        out.queue(Print("[SHIELD]"))?;
    }
    if p.is_invincible {
        row += 1;
        out.queue(cursor::MoveTo(PANEL_X, row))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("[INVINCIBLE]"))?;
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, board_row(ROWS) + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   P : Pause"))?;
    Ok(())
}

// ── Overlays & menus ──────────────────────────────────────────────────────────

/// Boxed message centred on the board.
fn draw_banner<W: Write>(out: &mut W, lines: &[&str], color: Color) -> std::io::Result<()> {
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let cx = BOARD_W / 2;
    let top = board_row(ROWS / 2).saturating_sub(lines.len() as u16 + 3);

    out.queue(style::SetForegroundColor(color))?;
    centered(out, cx, top, &format!("╔{}╗", "═".repeat(width)))?;
    for (i, line) in lines.iter().enumerate() {
        centered(out, cx, top + 1 + i as u16, &format!("║{:^width$}║", line))?;
    }
    centered(
        out,
        cx,
        top + 1 + lines.len() as u16,
        &format!("╚{}╝", "═".repeat(width)),
    )?;
    Ok(())
}

/// Vertical list with the selected entry highlighted.
fn draw_menu<W: Write>(
    out: &mut W,
    labels: &[&str],
    selected: usize,
    cx: u16,
    top: u16,
) -> std::io::Result<()> {
    for (i, label) in labels.iter().enumerate() {
        let (text, color) = if i == selected {
            (format!("> {} <", label), C_SELECTED)
        } else {
            (label.to_string(), Color::White)
        };
        out.queue(style::SetForegroundColor(color))?;
        centered(out, cx, top + i as u16 * 2, &text)?;
    }
    Ok(())
}

fn draw_main_menu<W: Write>(
    out: &mut W,
    session: &GameSession,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let cx = width / 2;
    let cy = height / 2;

    out.queue(style::SetForegroundColor(Color::Cyan))?;
    centered(out, cx, cy.saturating_sub(8), "★  SPACE  SHOOTER  ★")?;

    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    centered(
        out,
        cx,
        cy.saturating_sub(6),
        &format!("High Score: {}", session.high_score),
    )?;

    let labels: Vec<&str> = MAIN_MENU.iter().map(|i| i.label()).collect();
    draw_menu(out, &labels, session.menu_cursor, cx, cy.saturating_sub(3))?;

    if let Some(saved) = session.saved_game {
        out.queue(style::SetForegroundColor(C_HINT))?;
        centered(
            out,
            cx,
            cy + 6,
            &format!(
                "Saved game: level {}, {} lives, score {}",
                saved.level, saved.lives, saved.score
            ),
        )?;
    }

    out.queue(style::SetForegroundColor(C_HINT))?;
    centered(out, cx, cy + 8, "↑ ↓ / W S : Select   ENTER : Confirm")?;
    Ok(())
}

fn draw_instructions<W: Write>(out: &mut W, width: u16) -> std::io::Result<()> {
    let x = (width / 2).saturating_sub(24);
    // (indent, text, colour); an empty text is a blank line.
    let lines: &[(u16, &str, Color)] = &[
        (0, "CONTROLS", Color::Cyan),
        (2, "← → / A D   Move", Color::White),
        (2, "SPACE       Shoot", Color::White),
        (2, "P           Pause", Color::White),
        (0, "", Color::White),
        (0, "ENTITIES", Color::Cyan),
        (2, "/\\  Your ship", C_SHIP),
        (2, "()  Meteor - 1-2 bonus points", C_METEOR),
        (2, "«»  Enemy - 3 points, costs a life if it gets by", C_ENEMY),
        (2, "[]  Boss (level 3+) - 5 points, fires back", C_BOSS),
        (2, " ↓  Boss bullet - avoid!", C_BOSS_BULLET),
        (2, "<>  Shield - absorbs one hit (level 3+)", C_POWERUP),
        (0, "", Color::White),
        (0, "OBJECTIVE", Color::Cyan),
        (2, "Each level: destroy level x 10 enemies/bosses", Color::White),
        (2, "Clear level 5 to win. Don't lose 3 lives!", Color::White),
    ];

    let mut row = 2;
    for (indent, text, color) in lines.iter() {
        if !text.is_empty() {
            out.queue(cursor::MoveTo(x + indent, row))?;
            out.queue(style::SetForegroundColor(*color))?;
            out.queue(Print(*text))?;
        }
        row += 1;
    }

    out.queue(cursor::MoveTo(x, row + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Press ESC or BACKSPACE to return to menu"))?;
    Ok(())
}

fn draw_end_screen<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    let (title, color) = match session.screen {
        ScreenState::Victory => ("YOU WIN!", Color::Green),
        _ => ("GAME  OVER", Color::Red),
    };
    let score = session.player.score;
    let score_line = format!("Final Score: {:>6}", score);
    let best_line = if score >= session.high_score && score > 0 {
        format!("★ NEW BEST: {:>6} ★", score)
    } else {
        format!("Best Score:  {:>6}", session.high_score)
    };

    draw_banner(out, &[title, score_line.as_str(), best_line.as_str()], color)?;
    let labels: Vec<&str> = END_MENU.iter().map(|i| i.label()).collect();
    draw_menu(out, &labels, session.menu_cursor, BOARD_W / 2, board_row(ROWS / 2))?;
    Ok(())
}
