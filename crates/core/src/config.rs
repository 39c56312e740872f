use crate::{
    CardFilter, CardScope, DealerKind, DebuffKind, HandKind, JokerDef, JokerOp, JokerRarity,
    JokerTrigger, Rank, ScoreTable, Suit,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no target defined for level {0}")]
    InvalidLevel(u8),
    #[error("missing hand rule for {0}")]
    MissingHandRule(HandKind),
    #[error("duplicate hand rule for {0}")]
    DuplicateHandRule(HandKind),
    #[error("missing dealer rule for {0:?}")]
    MissingDealerRule(DealerKind),
    #[error("unknown joker: {0}")]
    UnknownJoker(String),
    #[error("duplicate joker definition: {0}")]
    DuplicateJoker(String),
}

fn default_level_score() -> i64 {
    20
}

fn default_level_mult() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandRule {
    pub kind: HandKind,
    pub display_name: String,
    pub base_score: i64,
    pub base_mult: i64,
    #[serde(default = "default_level_score")]
    pub level_score: i64,
    #[serde(default = "default_level_mult")]
    pub level_mult: i64,
}

/// Target scores for one level on each of the three dealer tracks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetRule {
    pub level: u8,
    pub base: i64,
    pub small_boss: i64,
    pub big_boss: i64,
}

impl TargetRule {
    pub fn for_dealer(&self, kind: DealerKind) -> i64 {
        match kind {
            DealerKind::Default => self.base,
            DealerKind::SmallBoss => self.small_boss,
            DealerKind::BigBoss => self.big_boss,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealerRule {
    pub kind: DealerKind,
    pub reward: i64,
    /// Pool the round debuff is drawn from. Empty means no debuff.
    #[serde(default)]
    pub debuffs: Vec<DebuffKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoundRule {
    pub hands: u8,
    pub discards: u8,
    pub hand_size: usize,
    pub max_play: usize,
    pub starting_balance: i64,
    pub joker_slots: usize,
    pub upgrade_price: i64,
    /// Adds each contributing card's point value to the hand score.
    pub add_card_points: bool,
}

impl Default for RoundRule {
    fn default() -> Self {
        Self {
            hands: 5,
            discards: 3,
            hand_size: 7,
            max_play: 5,
            starting_balance: 5,
            joker_slots: 5,
            upgrade_price: 4,
            add_card_points: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub hands: Vec<HandRule>,
    pub targets: Vec<TargetRule>,
    pub dealers: Vec<DealerRule>,
    #[serde(default)]
    pub round: RoundRule,
    #[serde(default)]
    pub jokers: Vec<JokerDef>,
}

const STANDARD_HANDS: [(HandKind, i64, i64); 10] = [
    (HandKind::HighCard, 5, 1),
    (HandKind::OnePair, 10, 2),
    (HandKind::TwoPair, 20, 3),
    (HandKind::ThreeOfAKind, 35, 3),
    (HandKind::Straight, 50, 4),
    (HandKind::Flush, 55, 4),
    (HandKind::FullHouse, 60, 4),
    (HandKind::FourOfAKind, 75, 6),
    (HandKind::StraightFlush, 100, 8),
    (HandKind::RoyalFlush, 100, 10),
];

const STANDARD_TARGETS: [(i64, i64, i64); 23] = [
    (300, 450, 600),
    (500, 750, 1125),
    (700, 1050, 1575),
    (900, 1350, 2025),
    (1100, 1650, 2475),
    (1300, 1950, 2925),
    (1800, 2700, 4050),
    (2300, 3450, 5175),
    (2800, 4200, 6300),
    (3600, 5400, 8100),
    (4500, 6750, 10125),
    (5500, 8250, 12375),
    (7200, 10800, 16200),
    (9000, 13500, 20250),
    (11000, 16500, 24750),
    (14400, 21600, 32400),
    (17000, 25500, 38250),
    (20000, 30000, 45000),
    (25200, 37800, 56700),
    (32000, 48000, 72000),
    (25000, 37500, 56250),
    (37800, 56700, 85050),
    (50000, 75000, 112500),
];

impl GameConfig {
    /// Built-in rules, identical to the shipped `assets/` files.
    pub fn standard() -> Self {
        let hands = STANDARD_HANDS
            .iter()
            .map(|&(kind, base_score, base_mult)| HandRule {
                kind,
                display_name: kind.display_name().to_string(),
                base_score,
                base_mult,
                level_score: default_level_score(),
                level_mult: default_level_mult(),
            })
            .collect();
        let targets = STANDARD_TARGETS
            .iter()
            .zip(0u8..)
            .map(|(&(base, small_boss, big_boss), level)| TargetRule {
                level,
                base,
                small_boss,
                big_boss,
            })
            .collect();
        let dealers = vec![
            DealerRule {
                kind: DealerKind::Default,
                reward: 5,
                debuffs: Vec::new(),
            },
            DealerRule {
                kind: DealerKind::SmallBoss,
                reward: 10,
                debuffs: Vec::new(),
            },
            DealerRule {
                kind: DealerKind::BigBoss,
                reward: 15,
                debuffs: vec![DebuffKind::PlayExactly(5), DebuffKind::HalveScore],
            },
        ];
        Self {
            hands,
            targets,
            dealers,
            round: RoundRule::default(),
            jokers: standard_jokers(),
        }
    }

    pub fn hand_rule(&self, kind: HandKind) -> Option<&HandRule> {
        self.hands.iter().find(|rule| rule.kind == kind)
    }

    /// Name shown to the player, taken from the hand rule when one is loaded.
    pub fn hand_name(&self, kind: HandKind) -> &str {
        self.hand_rule(kind)
            .map_or(kind.display_name(), |rule| rule.display_name.as_str())
    }

    pub fn target_rule(&self, level: u8) -> Option<&TargetRule> {
        self.targets.iter().find(|rule| rule.level == level)
    }

    pub fn target_for(&self, level: u8, kind: DealerKind) -> Result<i64, ConfigError> {
        self.target_rule(level)
            .map(|rule| rule.for_dealer(kind))
            .ok_or(ConfigError::InvalidLevel(level))
    }

    pub fn max_level(&self) -> Option<u8> {
        self.targets.iter().map(|rule| rule.level).max()
    }

    pub fn dealer_rule(&self, kind: DealerKind) -> Result<&DealerRule, ConfigError> {
        self.dealers
            .iter()
            .find(|rule| rule.kind == kind)
            .ok_or(ConfigError::MissingDealerRule(kind))
    }

    pub fn joker_def(&self, id: &str) -> Result<&JokerDef, ConfigError> {
        self.jokers
            .iter()
            .find(|def| def.id == id)
            .ok_or_else(|| ConfigError::UnknownJoker(id.to_string()))
    }

    /// Checks the structural rules a run relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ScoreTable::from_rules(&self.hands)?;
        for kind in DealerKind::ALL {
            self.dealer_rule(kind)?;
        }
        for (idx, def) in self.jokers.iter().enumerate() {
            if self.jokers[..idx].iter().any(|other| other.id == def.id) {
                return Err(ConfigError::DuplicateJoker(def.id.clone()));
            }
        }
        Ok(())
    }
}

fn standard_jokers() -> Vec<JokerDef> {
    vec![
        JokerDef {
            id: "multiplier_joker".to_string(),
            name: "Multiplier Joker".to_string(),
            rarity: JokerRarity::Common,
            price: 5,
            sell_value: 2,
            trigger: JokerTrigger::Always,
            ops: vec![JokerOp::AddMult(5)],
        },
        JokerDef {
            id: "moon_joker".to_string(),
            name: "Moon Joker".to_string(),
            rarity: JokerRarity::Rare,
            price: 8,
            sell_value: 4,
            trigger: JokerTrigger::Always,
            ops: vec![JokerOp::MultiplyMult(4)],
        },
        JokerDef {
            id: "heart_snake_joker".to_string(),
            name: "Heart Snake Joker".to_string(),
            rarity: JokerRarity::Uncommon,
            price: 20,
            sell_value: 6,
            trigger: JokerTrigger::Matching {
                filter: CardFilter::Suit(Suit::Hearts),
                scope: CardScope::Played,
            },
            ops: vec![JokerOp::MultiplyMultPerMatch(2)],
        },
        JokerDef {
            id: "castle_joker".to_string(),
            name: "Castle Joker".to_string(),
            rarity: JokerRarity::UltraRare,
            price: 40,
            sell_value: 10,
            trigger: JokerTrigger::Matching {
                filter: CardFilter::Ranks(vec![Rank::King, Rank::Queen]),
                scope: CardScope::Played,
            },
            ops: vec![
                JokerOp::AddScorePerMatch(50),
                JokerOp::MultiplyMultPerMatch(2),
            ],
        },
    ]
}
