use crate::{Card, DebuffKind, HandKind, JokerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The per-hand scoring accumulator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Score {
    pub hand_score: i64,
    pub multiplier: i64,
}

impl Score {
    pub fn total(&self) -> i64 {
        self.hand_score.saturating_mul(self.multiplier)
    }

    pub fn apply(&mut self, effect: &ScoreEffect) {
        match effect {
            ScoreEffect::AddScore(value) => self.hand_score = self.hand_score.saturating_add(*value),
            ScoreEffect::AddMult(value) => self.multiplier = self.multiplier.saturating_add(*value),
            ScoreEffect::MultiplyMult(value) => {
                self.multiplier = self.multiplier.saturating_mul(*value)
            }
            ScoreEffect::SetMult(value) => self.multiplier = *value,
            ScoreEffect::HalveScore => self.hand_score = self.hand_score.div_euclid(2),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScoreEffect {
    AddScore(i64),
    AddMult(i64),
    MultiplyMult(i64),
    SetMult(i64),
    HalveScore,
}

impl fmt::Display for ScoreEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreEffect::AddScore(value) => write!(f, "+{value} score"),
            ScoreEffect::AddMult(value) => write!(f, "+{value} mult"),
            ScoreEffect::MultiplyMult(value) => write!(f, "x{value} mult"),
            ScoreEffect::SetMult(value) => write!(f, "mult = {value}"),
            ScoreEffect::HalveScore => f.write_str("score halved"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StepSource {
    Base(HandKind),
    CardPoints(Card),
    Debuff(DebuffKind),
    Joker { id: JokerId, def: String },
}

impl fmt::Display for StepSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepSource::Base(kind) => write!(f, "base:{}", kind.id()),
            StepSource::CardPoints(card) => write!(f, "card:{card}"),
            StepSource::Debuff(kind) => write!(f, "debuff:{}", kind.id()),
            StepSource::Joker { id, def } => write!(f, "joker:{def}#{id}"),
        }
    }
}

/// One accumulator mutation, kept for step-by-step presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreStep {
    pub source: StepSource,
    pub effect: ScoreEffect,
    pub before: Score,
    pub after: Score,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halving_floors() {
        let mut score = Score {
            hand_score: 101,
            multiplier: 3,
        };
        score.apply(&ScoreEffect::HalveScore);
        assert_eq!(score.hand_score, 50);
        assert_eq!(score.multiplier, 3);
    }

    #[test]
    fn set_mult_replaces_instead_of_adding() {
        let mut score = Score {
            hand_score: 0,
            multiplier: 9,
        };
        score.apply(&ScoreEffect::SetMult(4));
        assert_eq!(score.multiplier, 4);
    }

    #[test]
    fn total_saturates() {
        let score = Score {
            hand_score: i64::MAX,
            multiplier: 2,
        };
        assert_eq!(score.total(), i64::MAX);
    }
}
