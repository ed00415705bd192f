use space_shooter::entities::*;
use space_shooter::grid::*;

// ── Grid ──────────────────────────────────────────────────────────────────────

#[test]
fn new_grid_is_empty() {
    let g = Grid::new();
    for row in 0..ROWS {
        for col in 0..COLS {
            assert!(g.is_empty_at(row, col));
        }
    }
}

#[test]
fn set_and_get() {
    let mut g = Grid::new();
    g.set(4, 9, EntityKind::Enemy);
    assert_eq!(g.get(4, 9), EntityKind::Enemy);
    assert!(!g.is_empty_at(4, 9));
    assert_eq!(g.count(EntityKind::Enemy), 1);
}

#[test]
fn in_bounds_edges() {
    assert!(Grid::in_bounds(0, 0));
    assert!(Grid::in_bounds(ROWS - 1, COLS - 1));
    assert!(!Grid::in_bounds(ROWS, 0));
    assert!(!Grid::in_bounds(0, COLS));
}

#[test]
#[should_panic(expected = "outside")]
fn get_out_of_bounds_panics() {
    let g = Grid::new();
    g.get(ROWS, 0);
}

#[test]
#[should_panic(expected = "outside")]
fn set_out_of_bounds_panics() {
    let mut g = Grid::new();
    g.set(0, COLS, EntityKind::Meteor);
}

#[test]
fn overlay_keeps_occupant_underneath() {
    let mut g = Grid::new();
    g.set(6, 3, EntityKind::Meteor);
    g.overlay(6, 3, EntityKind::Boss);
    assert_eq!(g.get(6, 3), EntityKind::Boss);
    assert_eq!(g.covered(6, 3), EntityKind::Meteor);

    g.vacate(6, 3);
    assert_eq!(g.get(6, 3), EntityKind::Meteor);
    assert_eq!(g.covered(6, 3), EntityKind::Empty);
}

#[test]
fn vacate_plain_cell_empties_it() {
    let mut g = Grid::new();
    g.set(2, 2, EntityKind::Bullet);
    g.vacate(2, 2);
    assert!(g.is_empty_at(2, 2));
}

#[test]
fn clear_cell_wipes_both_layers() {
    let mut g = Grid::new();
    g.set(6, 3, EntityKind::Enemy);
    g.overlay(6, 3, EntityKind::BossBullet);
    g.clear_cell(6, 3);
    assert!(g.is_empty_at(6, 3));
    assert_eq!(g.covered(6, 3), EntityKind::Empty);
}

#[test]
fn clear_entities_keeps_ship() {
    let mut g = Grid::new();
    g.set(SHIP_ROW, 7, EntityKind::Ship);
    g.set(0, 0, EntityKind::Meteor);
    g.set(5, 5, EntityKind::Boss);
    g.overlay(8, 1, EntityKind::Boss);
    g.clear_entities();

    assert_eq!(g.get(SHIP_ROW, 7), EntityKind::Ship);
    assert_eq!(g.count(EntityKind::Meteor), 0);
    assert_eq!(g.count(EntityKind::Boss), 0);
    assert_eq!(g.covered(8, 1), EntityKind::Empty);
}

#[test]
fn clear_all_removes_ship_too() {
    let mut g = Grid::new();
    g.set(SHIP_ROW, 7, EntityKind::Ship);
    g.clear_all();
    assert_eq!(g.count(EntityKind::Ship), 0);
}

#[test]
fn positions_are_row_major() {
    let mut g = Grid::new();
    g.set(3, 10, EntityKind::Enemy);
    g.set(1, 4, EntityKind::Enemy);
    g.set(3, 2, EntityKind::Enemy);
    g.set(2, 2, EntityKind::Meteor);
    let found: Vec<_> = g.positions(EntityKind::Enemy).collect();
    assert_eq!(found, vec![(1, 4), (3, 2), (3, 10)]);
}

// ── Shield pool ───────────────────────────────────────────────────────────────

#[test]
fn shield_pool_fills_up() {
    let mut pool = ShieldPool::default();
    for col in 0..MAX_SHIELD_POWERUPS {
        assert!(pool.spawn(0, col));
    }
    assert!(!pool.has_free_slot());
    assert!(!pool.spawn(0, 0), "sixth power-up must be dropped");
    assert_eq!(pool.active().count(), MAX_SHIELD_POWERUPS);
}

#[test]
fn shield_pool_reuses_freed_slot() {
    let mut pool = ShieldPool::default();
    for col in 0..MAX_SHIELD_POWERUPS {
        pool.spawn(0, col);
    }
    pool.slots[2].active = false;
    assert!(pool.spawn(4, 11));
    assert_eq!(pool.slots[2].row, 4);
    assert_eq!(pool.slots[2].col, 11);
}

#[test]
fn shield_pool_clear() {
    let mut pool = ShieldPool::default();
    pool.spawn(1, 1);
    pool.clear();
    assert_eq!(pool.active().count(), 0);
}

// ── Hit-effect pool ───────────────────────────────────────────────────────────

#[test]
fn hit_effect_expires_after_duration() {
    let mut pool = HitEffectPool::default();
    pool.spawn(5, 5);

    pool.advance(0.29);
    assert_eq!(pool.active().count(), 1);

    let mut fresh = HitEffectPool::default();
    fresh.spawn(5, 5);
    fresh.advance(HIT_EFFECT_DURATION);
    assert_eq!(fresh.active().count(), 0);
}

#[test]
fn hit_effect_pool_drops_overflow() {
    let mut pool = HitEffectPool::default();
    for i in 0..MAX_HIT_EFFECTS {
        assert!(pool.spawn(i % ROWS, i % COLS));
    }
    assert!(!pool.spawn(0, 0));
    assert_eq!(pool.active().count(), MAX_HIT_EFFECTS);
}
