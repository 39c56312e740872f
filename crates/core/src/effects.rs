use crate::{Card, Rank, ScoreEffect, Suit};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JokerRarity {
    Common,
    Uncommon,
    Rare,
    UltraRare,
}

/// Card predicate used by count-scaled jokers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardFilter {
    Any,
    Suit(Suit),
    Ranks(Vec<Rank>),
    Face,
}

impl CardFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            CardFilter::Any => true,
            CardFilter::Suit(suit) => card.suit == *suit,
            CardFilter::Ranks(ranks) => ranks.contains(&card.rank),
            CardFilter::Face => card.rank.is_face(),
        }
    }
}

/// Which cards a matching trigger counts over.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardScope {
    #[default]
    Played,
    Contributing,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JokerTrigger {
    Always,
    /// Fires when at least one card in scope matches; the match count feeds
    /// the per-match ops.
    Matching {
        filter: CardFilter,
        #[serde(default)]
        scope: CardScope,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JokerOp {
    AddMult(i64),
    MultiplyMult(i64),
    AddScorePerMatch(i64),
    AddMultPerMatch(i64),
    /// multiplier *= matches * n
    MultiplyMultPerMatch(i64),
}

impl JokerOp {
    pub fn effect(self, matches: usize) -> ScoreEffect {
        let count = matches as i64;
        match self {
            JokerOp::AddMult(value) => ScoreEffect::AddMult(value),
            JokerOp::MultiplyMult(value) => ScoreEffect::MultiplyMult(value),
            JokerOp::AddScorePerMatch(value) => ScoreEffect::AddScore(value.saturating_mul(count)),
            JokerOp::AddMultPerMatch(value) => ScoreEffect::AddMult(value.saturating_mul(count)),
            JokerOp::MultiplyMultPerMatch(value) => {
                ScoreEffect::MultiplyMult(value.saturating_mul(count))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JokerDef {
    pub id: String,
    pub name: String,
    pub rarity: JokerRarity,
    pub price: i64,
    pub sell_value: i64,
    pub trigger: JokerTrigger,
    pub ops: Vec<JokerOp>,
}

impl JokerDef {
    /// Counts matching cards for this joker's trigger. `Always` jokers report
    /// one match so they fire unconditionally.
    pub fn count_matches(&self, played: &[Card], contributing: &[Card]) -> usize {
        match &self.trigger {
            JokerTrigger::Always => 1,
            JokerTrigger::Matching { filter, scope } => {
                let cards = match scope {
                    CardScope::Played => played,
                    CardScope::Contributing => contributing,
                };
                cards.iter().filter(|card| filter.matches(card)).count()
            }
        }
    }

    /// Player-facing ability text for a given match count.
    pub fn ability_text(&self, matches: usize) -> String {
        self.ops
            .iter()
            .map(|op| op.effect(matches).to_string())
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

/// Dealer-imposed constraint, active for one encounter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DebuffKind {
    /// Rejects any play that is not exactly this many cards.
    PlayExactly(usize),
    /// Floor-halves the hand score; never rejects.
    HalveScore,
}

impl DebuffKind {
    pub fn id(self) -> &'static str {
        match self {
            DebuffKind::PlayExactly(_) => "play_exactly",
            DebuffKind::HalveScore => "halve_score",
        }
    }

    pub fn allows(self, played: &[Card]) -> bool {
        match self {
            DebuffKind::PlayExactly(count) => played.len() == count,
            DebuffKind::HalveScore => true,
        }
    }

    /// Accumulator mutation applied once the play is allowed.
    pub fn penalty(self) -> Option<ScoreEffect> {
        match self {
            DebuffKind::PlayExactly(_) => None,
            DebuffKind::HalveScore => Some(ScoreEffect::HalveScore),
        }
    }
}

impl fmt::Display for DebuffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebuffKind::PlayExactly(5) => f.write_str("Play Five Cards"),
            DebuffKind::PlayExactly(count) => write!(f, "Play {count} Cards"),
            DebuffKind::HalveScore => f.write_str("Base Score Reduced"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn castle() -> JokerDef {
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
            ops: vec![JokerOp::AddScorePerMatch(50), JokerOp::MultiplyMultPerMatch(2)],
        }
    }

    #[test]
    fn matching_counts_only_filtered_cards() {
        let played = vec![
            Card::new(Rank::King, Suit::Hearts),
            Card::new(Rank::Queen, Suit::Spades),
            Card::new(Rank::Jack, Suit::Spades),
        ];
        assert_eq!(castle().count_matches(&played, &played[..1]), 2);
    }

    #[test]
    fn ability_text_scales_with_matches() {
        assert_eq!(castle().ability_text(2), "+100 score and x4 mult");
    }

    #[test]
    fn debuff_gate() {
        let three = vec![Card::new(Rank::Two, Suit::Clubs); 3];
        assert!(!DebuffKind::PlayExactly(5).allows(&three));
        assert!(DebuffKind::HalveScore.allows(&three));
        assert_eq!(DebuffKind::PlayExactly(5).penalty(), None);
        assert_eq!(DebuffKind::PlayExactly(5).to_string(), "Play Five Cards");
    }
}
