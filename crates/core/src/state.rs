use crate::{HandKind, RoundRule};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingPlay,
    Resolving,
    Scored,
    RoundOver(RoundOutcome),
}

impl Phase {
    pub fn is_over(self) -> bool {
        matches!(self, Phase::RoundOver(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub level: u8,
    pub phase: Phase,
    pub target: i64,
    /// Running total for the current round.
    pub score: i64,
    pub hands_left: u8,
    pub discards_left: u8,
    pub hand_size: usize,
    pub balance: i64,
    #[serde(default)]
    pub last_hand: Option<HandKind>,
    #[serde(default)]
    pub rounds_won: u32,
}

impl GameState {
    pub fn new(rules: &RoundRule) -> Self {
        Self {
            level: 0,
            phase: Phase::Idle,
            target: 0,
            score: 0,
            hands_left: 0,
            discards_left: 0,
            hand_size: rules.hand_size,
            balance: rules.starting_balance,
            last_hand: None,
            rounds_won: 0,
        }
    }

    /// Outcome after a scored hand: a strict beat of the target wins, running
    /// out of hands loses, anything else keeps the round going.
    pub fn check_outcome(&self) -> Option<RoundOutcome> {
        if self.score > self.target {
            Some(RoundOutcome::Won)
        } else if self.hands_left == 0 {
            Some(RoundOutcome::Lost)
        } else {
            None
        }
    }
}
