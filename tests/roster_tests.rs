/// Roster and configuration loading tests against the shipped data files.

use encounter_loop::core::config::EncounterConfig;
use encounter_loop::core::roster::{EnemyRoster, PartyRoster, RosterError};
use encounter_loop::schema::enemy::EnemyId;
use std::path::Path;

#[test]
fn shipped_enemies_load() {
    let roster = EnemyRoster::load_from_ron(Path::new("data/enemies.ron")).unwrap();
    assert_eq!(roster.len(), 3);

    let expected = [
        ("syntax-error", "丁寧なリントとコード整形。"),
        ("null-pointer", "nullチェックとOption型の活用。"),
        ("race-condition", "ロックとイミュータブルデータ構造。"),
    ];
    for (id, weakness) in expected {
        let enemy = roster.get(&EnemyId::from(id)).unwrap();
        assert_eq!(enemy.weakness, weakness);
        assert_eq!(enemy.sprite, format!("enemy-{id}"));
        assert!(enemy.has_taunts());
    }
    assert!(roster.silent_enemies().is_empty());
}

#[test]
fn shipped_party_loads() {
    let party = PartyRoster::load_from_ron(Path::new("data/party.ron")).unwrap();
    let names: Vec<&str> = party.members().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["マルス", "ふじこ", "ひろゆき", "かんぺき"]);
    assert_eq!(party.members()[1].mp, 120);
}

#[test]
fn shipped_config_matches_defaults() {
    let config = EncounterConfig::load_from_ron(Path::new("data/encounter.ron")).unwrap();
    assert_eq!(config, EncounterConfig::default());
}

#[test]
fn duplicate_fixture_rejected() {
    let result = EnemyRoster::load_from_ron(Path::new("tests/fixtures/duplicate_ids.ron"));
    match result {
        Err(RosterError::DuplicateId(id)) => assert_eq!(id.as_str(), "null-pointer"),
        other => panic!("expected duplicate id, got {other:?}"),
    }
}

#[test]
fn silent_fixture_loads() {
    let roster = EnemyRoster::load_from_ron(Path::new("tests/fixtures/silent.ron")).unwrap();
    assert_eq!(roster.len(), 1);
    assert!(roster.silent_enemies().contains(&EnemyId::from("heisenbug")));
}

#[test]
fn missing_file_is_io_error() {
    let result = EnemyRoster::load_from_ron(Path::new("tests/fixtures/nope.ron"));
    assert!(matches!(result, Err(RosterError::Io(_))));
}
