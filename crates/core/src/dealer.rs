use crate::{ConfigError, DebuffKind, GameConfig, RngState};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DealerKind {
    #[default]
    Default,
    SmallBoss,
    BigBoss,
}

impl DealerKind {
    pub const ALL: [DealerKind; 3] = [
        DealerKind::Default,
        DealerKind::SmallBoss,
        DealerKind::BigBoss,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DealerKind::Default => "default",
            DealerKind::SmallBoss => "small_boss",
            DealerKind::BigBoss => "big_boss",
        }
    }
}

impl FromStr for DealerKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let norm = value.trim().to_lowercase().replace('-', "_");
        DealerKind::ALL
            .into_iter()
            .find(|kind| kind.id() == norm)
            .ok_or_else(|| format!("unknown dealer: {value}"))
    }
}

/// The opponent for one round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dealer {
    pub kind: DealerKind,
    pub level: u8,
    pub target_score: i64,
    pub reward: i64,
    pub debuff: Option<DebuffKind>,
}

impl Dealer {
    /// Builds the dealer for `level`, drawing its debuff from the configured
    /// pool exactly once.
    pub fn roll(
        config: &GameConfig,
        level: u8,
        kind: DealerKind,
        rng: &mut RngState,
    ) -> Result<Self, ConfigError> {
        let target_score = config.target_for(level, kind)?;
        let rule = config.dealer_rule(kind)?;
        let debuff = rng.choose(&rule.debuffs).copied();
        Ok(Self {
            kind,
            level,
            target_score,
            reward: rule.reward,
            debuff,
        })
    }
}
