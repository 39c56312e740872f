pub use deckbound_core::{
    CardFilter, CardScope, DealerRule, GameConfig, HandRule, JokerDef, JokerOp, JokerRarity,
    JokerTrigger, RoundRule, TargetRule,
};

pub const HANDS_FILE: &str = "hands.json";
pub const TARGETS_FILE: &str = "targets.json";
pub const DEALERS_FILE: &str = "dealers.json";
pub const ROUND_FILE: &str = "round.json";
pub const JOKERS_FILE: &str = "jokers.json";
