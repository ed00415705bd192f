//! The shared board plus the fixed-capacity shield and hit-effect pools.
//!
//! Every cell holds exactly one visible `EntityKind`.  Bosses and boss
//! bullets may pass over meteors and enemies; the entity underneath is kept
//! in a second "covered" layer and comes back when the overlay leaves.

use crate::entities::{
    EntityKind, HitEffect, ShieldPowerup, COLS, HIT_EFFECT_DURATION, MAX_HIT_EFFECTS,
    MAX_SHIELD_POWERUPS, ROWS,
};

// ── Grid ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: [[EntityKind; COLS]; ROWS],
    covered: [[EntityKind; COLS]; ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[EntityKind::Empty; COLS]; ROWS],
            covered: [[EntityKind::Empty; COLS]; ROWS],
        }
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < ROWS && col < COLS
    }

    fn check(row: usize, col: usize) {
        assert!(
            Self::in_bounds(row, col),
            "cell ({row}, {col}) is outside the {ROWS}x{COLS} grid"
        );
    }

    pub fn get(&self, row: usize, col: usize) -> EntityKind {
        Self::check(row, col);
        self.cells[row][col]
    }

    /// Overwrite the visible entity.  The covered layer is left alone.
    pub fn set(&mut self, row: usize, col: usize, kind: EntityKind) {
        Self::check(row, col);
        self.cells[row][col] = kind;
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == EntityKind::Empty
    }

    /// The entity hidden beneath an overlay, `Empty` if none.
    pub fn covered(&self, row: usize, col: usize) -> EntityKind {
        Self::check(row, col);
        self.covered[row][col]
    }

    /// Put `kind` on top of whatever is in the cell, keeping the occupant
    /// underneath.
    pub fn overlay(&mut self, row: usize, col: usize, kind: EntityKind) {
        Self::check(row, col);
        debug_assert_eq!(self.covered[row][col], EntityKind::Empty);
        self.covered[row][col] = self.cells[row][col];
        self.cells[row][col] = kind;
    }

    /// Remove the visible entity, revealing anything it covered.
    pub fn vacate(&mut self, row: usize, col: usize) {
        Self::check(row, col);
        self.cells[row][col] = self.covered[row][col];
        self.covered[row][col] = EntityKind::Empty;
    }

    /// Wipe both layers of one cell.
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        Self::check(row, col);
        self.cells[row][col] = EntityKind::Empty;
        self.covered[row][col] = EntityKind::Empty;
    }

    pub fn clear_all(&mut self) {
        self.cells = [[EntityKind::Empty; COLS]; ROWS];
        self.covered = [[EntityKind::Empty; COLS]; ROWS];
    }

    /// Remove every entity except the ship.  Callers still place the ship
    /// explicitly afterwards.
    pub fn clear_entities(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if *cell != EntityKind::Ship {
                    *cell = EntityKind::Empty;
                }
            }
        }
        self.covered = [[EntityKind::Empty; COLS]; ROWS];
    }

    /// Visible cells holding `kind`, in row-major order.
    pub fn positions(&self, kind: EntityKind) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(move |&(_, &cell)| cell == kind)
                .map(move |(c, _)| (r, c))
        })
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.positions(kind).count()
    }

    pub fn rows(&self) -> &[[EntityKind; COLS]; ROWS] {
        &self.cells
    }
}

// ── Shield power-up pool ──────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShieldPool {
    pub slots: [ShieldPowerup; MAX_SHIELD_POWERUPS],
}

impl ShieldPool {
    /// Activate the first free slot at (row, col).  Returns false if the pool
    /// is full.
    pub fn spawn(&mut self, row: usize, col: usize) -> bool {
        match self.slots.iter_mut().find(|s| !s.active) {
            Some(slot) => {
                *slot = ShieldPowerup { row, col, active: true };
                true
            }
            None => false,
        }
    }

    pub fn has_free_slot(&self) -> bool {
        self.slots.iter().any(|s| !s.active)
    }

    pub fn active(&self) -> impl Iterator<Item = &ShieldPowerup> {
        self.slots.iter().filter(|s| s.active)
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.active = false;
        }
    }
}

// ── Hit-effect pool ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct HitEffectPool {
    pub slots: [HitEffect; MAX_HIT_EFFECTS],
}

impl Default for HitEffectPool {
    fn default() -> Self {
        Self {
            slots: [HitEffect::default(); MAX_HIT_EFFECTS],
        }
    }
}

impl HitEffectPool {
    /// Start an explosion at (row, col).  Silently dropped when all slots are
    /// busy.
    pub fn spawn(&mut self, row: usize, col: usize) -> bool {
        match self.slots.iter_mut().find(|e| !e.active) {
            Some(slot) => {
                *slot = HitEffect {
                    row,
                    col,
                    elapsed: 0.0,
                    active: true,
                };
                true
            }
            None => false,
        }
    }

    /// Age every live effect and retire the expired ones.
    pub fn advance(&mut self, dt: f32) {
        for effect in self.slots.iter_mut().filter(|e| e.active) {
            effect.elapsed += dt;
            if effect.elapsed >= HIT_EFFECT_DURATION {
                effect.active = false;
            }
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &HitEffect> {
        self.slots.iter().filter(|e| e.active)
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.active = false;
        }
    }
}
