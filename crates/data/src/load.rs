use crate::schema::{
    DealerRule, GameConfig, HandRule, JokerDef, RoundRule, TargetRule, DEALERS_FILE, HANDS_FILE,
    JOKERS_FILE, ROUND_FILE, TARGETS_FILE,
};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Reads and validates a full rule set from an assets directory.
///
/// `hands.json`, `targets.json` and `dealers.json` are required. `round.json`
/// and `jokers.json` fall back to the built-in defaults when absent.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let hands: Vec<HandRule> = load_json(dir.join(HANDS_FILE))?;
    let targets: Vec<TargetRule> = load_json(dir.join(TARGETS_FILE))?;
    let dealers: Vec<DealerRule> = load_json(dir.join(DEALERS_FILE))?;
    let round_path = dir.join(ROUND_FILE);
    let round: RoundRule = if round_path.exists() {
        load_json(round_path)?
    } else {
        log::debug!("{} missing, using default round rules", ROUND_FILE);
        RoundRule::default()
    };
    let jokers_path = dir.join(JOKERS_FILE);
    let jokers: Vec<JokerDef> = if jokers_path.exists() {
        load_json(jokers_path)?
    } else {
        log::debug!("{} missing, using built-in jokers", JOKERS_FILE);
        GameConfig::standard().jokers
    };

    let config = GameConfig {
        hands,
        targets,
        dealers,
        round,
        jokers,
    };
    validate_config(&config).with_context(|| format!("validate {}", dir.display()))?;
    log::info!(
        "loaded {} hand rules, {} levels, {} jokers from {}",
        config.hands.len(),
        config.targets.len(),
        config.jokers.len(),
        dir.display()
    );
    Ok(config)
}

/// Loads from `dir` when given, otherwise returns the built-in rules.
pub fn load_or_standard(dir: Option<&Path>) -> anyhow::Result<GameConfig> {
    match dir {
        Some(dir) => load_game_config(dir),
        None => Ok(GameConfig::standard()),
    }
}

pub fn validate_config(config: &GameConfig) -> anyhow::Result<()> {
    config.validate()?;

    let mut levels = HashSet::new();
    for target in &config.targets {
        if !levels.insert(target.level) {
            bail!("duplicate target for level {}", target.level);
        }
        if target.base <= 0 || target.small_boss <= 0 || target.big_boss <= 0 {
            bail!("targets for level {} must be positive", target.level);
        }
    }
    if config.targets.is_empty() {
        bail!("no target levels defined");
    }

    for rule in &config.hands {
        if rule.base_score < 0 || rule.base_mult < 0 {
            bail!("negative base values for {}", rule.kind);
        }
    }

    for def in &config.jokers {
        if def.price < 0 || def.sell_value < 0 {
            bail!("joker {} has a negative price", def.id);
        }
        if def.ops.is_empty() {
            bail!("joker {} has no ops", def.id);
        }
    }

    let round = &config.round;
    if round.hands == 0 {
        bail!("round must allow at least one hand");
    }
    if round.max_play == 0 || round.max_play > 5 {
        bail!("max_play must be between 1 and 5, got {}", round.max_play);
    }
    if round.hand_size < round.max_play {
        bail!(
            "hand_size {} is smaller than max_play {}",
            round.hand_size,
            round.max_play
        );
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
