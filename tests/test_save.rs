use std::path::Path;

use space_shooter::config::*;
use space_shooter::save::{self, SaveError, SaveRecord};

// ── Record format ─────────────────────────────────────────────────────────────

#[test]
fn record_formats_as_four_integers() {
    let r = SaveRecord {
        high_score: 120,
        lives: 2,
        score: 45,
        level: 3,
    };
    assert_eq!(r.to_string(), "120 2 45 3");
}

#[test]
fn parse_ignores_trailing_tokens_and_whitespace() {
    let r: SaveRecord = "  7 1 2 4 extra stuff\n".parse().unwrap();
    assert_eq!(
        r,
        SaveRecord {
            high_score: 7,
            lives: 1,
            score: 2,
            level: 4,
        }
    );
}

#[test]
fn parse_rejects_non_numbers() {
    let err = "10 two 3 1".parse::<SaveRecord>().unwrap_err();
    assert!(matches!(err, SaveError::InvalidSaveFormat(_)));
    assert!(err.to_string().starts_with("Invalid save format"));
}

#[test]
fn parse_rejects_short_line() {
    let err = "10 2".parse::<SaveRecord>().unwrap_err();
    assert!(matches!(err, SaveError::InvalidSaveFormat(_)));
}

#[test]
fn parse_rejects_negative_values() {
    assert!("-1 0 0 0".parse::<SaveRecord>().is_err());
}

#[test]
fn parse_rejects_level_past_the_last() {
    let err = "0 3 0 9".parse::<SaveRecord>().unwrap_err();
    assert!(matches!(err, SaveError::InvalidSaveFormat(_)));
    assert!("0 3 0 5".parse::<SaveRecord>().is_ok());
}

#[test]
fn out_of_range_level_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save-file.txt");
    std::fs::write(&path, "0 3 0 9").unwrap();
    assert_eq!(save::load_or_default(&path), SaveRecord::default());
}

#[test]
fn resumable_needs_level_and_lives() {
    assert!(!SaveRecord::default().is_resumable());
    assert!(!SaveRecord::cleared(300).is_resumable());
    let dead = SaveRecord {
        high_score: 0,
        lives: 0,
        score: 5,
        level: 2,
    };
    assert!(!dead.is_resumable());
    let live = SaveRecord {
        lives: 1,
        ..dead
    };
    assert!(live.is_resumable());
}

// ── File I/O ──────────────────────────────────────────────────────────────────

#[test]
fn missing_file_is_created_with_zeros() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save-file.txt");

    let record = save::load(&path).unwrap();
    assert_eq!(record, SaveRecord::default());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "0 0 0 0");
}

#[test]
fn store_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save-file.txt");
    let record = SaveRecord {
        high_score: 99,
        lives: 3,
        score: 14,
        level: 2,
    };
    save::store(&path, &record).unwrap();
    assert_eq!(save::load(&path).unwrap(), record);
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save-file.txt");
    std::fs::write(&path, "not a save file").unwrap();
    assert!(matches!(
        save::load(&path),
        Err(SaveError::InvalidSaveFormat(_))
    ));
    assert_eq!(save::load_or_default(&path), SaveRecord::default());
}

#[test]
fn unwritable_location_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("save-file.txt");
    assert!(matches!(
        save::store(&path, &SaveRecord::default()),
        Err(SaveError::Io(_))
    ));
}

// ── Config ────────────────────────────────────────────────────────────────────

#[test]
fn config_defaults() {
    let c = Config::default();
    assert_eq!(c.invincibility_secs, 1.0);
    assert_eq!(c.boss_fire_intervals, [5, 4, 3]);
    assert!(!c.shield_zigzag);
    assert_eq!(c.save_path, Path::new("save-file.txt"));
    assert_eq!(c.frame_rate, 60);
    assert_eq!(c.seed, None);
}

#[test]
fn partial_json_fills_in_defaults() {
    let c = Config::from_json(r#"{ "shield_zigzag": true, "seed": 7 }"#).unwrap();
    assert!(c.shield_zigzag);
    assert_eq!(c.seed, Some(7));
    assert_eq!(c.invincibility_secs, 1.0);
    assert_eq!(c.boss_fire_intervals, [5, 4, 3]);
}

#[test]
fn bad_json_is_parse_error() {
    assert!(matches!(
        Config::from_json("{ invincibility_secs: "),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn boss_fire_interval_by_level() {
    let c = Config::default();
    assert_eq!(c.boss_fire_interval(3), 5);
    assert_eq!(c.boss_fire_interval(4), 4);
    assert_eq!(c.boss_fire_interval(5), 3);
    assert_eq!(c.boss_fire_interval(1), 5);
    assert_eq!(c.boss_fire_interval(9), 3);

    let zero = Config {
        boss_fire_intervals: [0, 0, 0],
        ..Config::default()
    };
    assert_eq!(zero.boss_fire_interval(3), 1);
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("space_shooter.json");
    let config = Config {
        invincibility_secs: 2.5,
        frame_rate: 30,
        ..Config::default()
    };
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(Config::load(&path), Err(ConfigError::Io(_))));
    assert_eq!(Config::load_or_default(&path), Config::default());
}
