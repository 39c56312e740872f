use deckbound_core::{DealerKind, EventBus, GameConfig, HandKind, RunState};
use deckbound_data::{load_game_config, load_or_standard, validate_config};
use std::fs;
use std::path::{Path, PathBuf};

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

/// Copies the shipped assets into a fresh scratch directory.
fn scratch_assets(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("deckbound-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    for entry in fs::read_dir(assets_root()).expect("read assets") {
        let entry = entry.expect("entry");
        fs::copy(entry.path(), dir.join(entry.file_name())).expect("copy asset");
    }
    dir
}

fn error_chain(dir: &Path) -> String {
    format!("{:#}", load_game_config(dir).unwrap_err())
}

#[test]
fn shipped_assets_match_builtin_rules() {
    let loaded = load_game_config(&assets_root()).expect("load config");
    let standard = GameConfig::standard();
    assert_eq!(loaded.hands, standard.hands);
    assert_eq!(loaded.targets, standard.targets);
    assert_eq!(loaded.dealers, standard.dealers);
    assert_eq!(loaded.round, standard.round);
    assert_eq!(loaded.jokers, standard.jokers);
}

#[test]
fn loaded_config_drives_a_round() {
    let config = load_game_config(&assets_root()).expect("load config");
    let mut run = RunState::new(config, 11).expect("new run");
    let mut events = EventBus::default();
    run.start_round(0, DealerKind::BigBoss, &mut events)
        .expect("start round");
    assert_eq!(run.state.target, 600);
    assert!(run.active_debuff().is_some());
    assert_eq!(run.table.effective_base(HandKind::FullHouse), (60, 4));
}

#[test]
fn optional_files_fall_back_to_defaults() {
    let dir = scratch_assets("optional");
    fs::remove_file(dir.join("round.json")).expect("remove round");
    fs::remove_file(dir.join("jokers.json")).expect("remove jokers");
    let config = load_game_config(&dir).expect("load config");
    assert_eq!(config.round, GameConfig::standard().round);
    assert_eq!(config.jokers.len(), 4);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_hand_rule_is_rejected() {
    let dir = scratch_assets("missing-hand");
    let raw = fs::read_to_string(dir.join("hands.json")).expect("read hands");
    let mut hands: Vec<serde_json::Value> = serde_json::from_str(&raw).expect("parse hands");
    hands.retain(|rule| rule["kind"] != "flush");
    fs::write(
        dir.join("hands.json"),
        serde_json::to_string(&hands).expect("encode"),
    )
    .expect("write hands");
    let err = error_chain(&dir);
    assert!(err.contains("missing hand rule for Flush"), "{err}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_json_names_the_file() {
    let dir = scratch_assets("malformed");
    fs::write(dir.join("targets.json"), "[{").expect("write targets");
    let err = error_chain(&dir);
    assert!(err.contains("targets.json"), "{err}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_required_file_fails() {
    let dir = scratch_assets("missing-file");
    fs::remove_file(dir.join("dealers.json")).expect("remove dealers");
    let err = error_chain(&dir);
    assert!(err.contains("dealers.json"), "{err}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn invalid_round_rules_are_rejected() {
    let mut config = GameConfig::standard();
    config.round.max_play = 6;
    assert!(validate_config(&config).is_err());

    let mut config = GameConfig::standard();
    config.round.hands = 0;
    assert!(validate_config(&config).is_err());

    let mut config = GameConfig::standard();
    let duplicate = config.targets[0];
    config.targets.push(duplicate);
    assert!(validate_config(&config).is_err());
}

#[test]
fn no_directory_means_builtin_rules() {
    let config = load_or_standard(None).expect("standard");
    assert_eq!(config.max_level(), Some(22));
}
