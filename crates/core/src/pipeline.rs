use crate::{
    classify, Card, DebuffKind, HandKind, JokerDef, JokerId, RoundRule, Score, ScoreEffect,
    ScoreStep, ScoreTable, StepSource,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// An owned joker as seen by the pipeline, in acquisition order.
#[derive(Debug, Clone, Copy)]
pub struct ActiveJoker<'a> {
    pub id: JokerId,
    pub def: &'a JokerDef,
}

/// A play vetoed by the active debuff. The accumulator was never touched.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("play rejected: {debuff}")]
pub struct Rejected {
    pub debuff: DebuffKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResolution {
    pub kind: Option<HandKind>,
    /// Contributing cards, high to low.
    pub cards: Vec<Card>,
    pub steps: Vec<ScoreStep>,
    pub score: Score,
    pub total: i64,
    /// Match count each joker saw on this hand.
    pub joker_matches: HashMap<JokerId, usize>,
}

/// Live category and base values shown while the player is still selecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub kind: Option<HandKind>,
    pub cards: Vec<Card>,
    pub base: Score,
}

/// Scratch state owned by one resolution and dropped with it.
struct HandContext<'a> {
    played: &'a [Card],
    contributing: &'a [Card],
    score: Score,
    steps: Vec<ScoreStep>,
    joker_matches: HashMap<JokerId, usize>,
}

impl<'a> HandContext<'a> {
    fn new(played: &'a [Card], contributing: &'a [Card]) -> Self {
        Self {
            played,
            contributing,
            score: Score::default(),
            steps: Vec::new(),
            joker_matches: HashMap::new(),
        }
    }

    fn apply(&mut self, source: StepSource, effect: ScoreEffect) {
        let before = self.score;
        self.score.apply(&effect);
        log::debug!(
            "{source}: {effect} ({}x{} -> {}x{})",
            before.hand_score,
            before.multiplier,
            self.score.hand_score,
            self.score.multiplier
        );
        self.steps.push(ScoreStep {
            source,
            effect,
            before,
            after: self.score,
        });
    }
}

pub fn preview(played: &[Card], table: &ScoreTable) -> Preview {
    let classification = classify(played);
    let (hand_score, multiplier) = table.base_for(classification.kind);
    Preview {
        kind: classification.kind,
        cards: classification.cards,
        base: Score {
            hand_score,
            multiplier,
        },
    }
}

/// Scores one played hand.
///
/// Order: debuff gate, base seed (score added, multiplier set), debuff
/// penalty, optional card points, then each joker in acquisition order.
/// A play with no category stops after the gate and scores (0, 0).
pub fn resolve(
    played: &[Card],
    table: &ScoreTable,
    debuff: Option<DebuffKind>,
    jokers: &[ActiveJoker<'_>],
    rules: &RoundRule,
) -> Result<HandResolution, Rejected> {
    if let Some(debuff) = debuff {
        if !debuff.allows(played) {
            return Err(Rejected { debuff });
        }
    }

    let classification = classify(played);
    let Some(kind) = classification.kind else {
        log::debug!("{} cards form no category, nothing to score", played.len());
        return Ok(HandResolution {
            kind: None,
            cards: Vec::new(),
            steps: Vec::new(),
            score: Score::default(),
            total: 0,
            joker_matches: HashMap::new(),
        });
    };
    let mut ctx = HandContext::new(played, &classification.cards);

    let (base_score, base_mult) = table.effective_base(kind);
    ctx.apply(StepSource::Base(kind), ScoreEffect::AddScore(base_score));
    ctx.apply(StepSource::Base(kind), ScoreEffect::SetMult(base_mult));

    if let Some(debuff) = debuff {
        if let Some(effect) = debuff.penalty() {
            ctx.apply(StepSource::Debuff(debuff), effect);
        }
    }

    if rules.add_card_points {
        for &card in ctx.contributing {
            ctx.apply(StepSource::CardPoints(card), ScoreEffect::AddScore(card.points()));
        }
    }

    for joker in jokers {
        let matches = joker.def.count_matches(ctx.played, ctx.contributing);
        ctx.joker_matches.insert(joker.id, matches);
        if matches == 0 {
            log::debug!("joker:{}#{} skipped", joker.def.id, joker.id);
            continue;
        }
        for op in &joker.def.ops {
            let source = StepSource::Joker {
                id: joker.id,
                def: joker.def.id.clone(),
            };
            ctx.apply(source, op.effect(matches));
        }
    }

    let score = ctx.score;
    Ok(HandResolution {
        kind: Some(kind),
        cards: classification.cards.clone(),
        steps: ctx.steps,
        score,
        total: score.total(),
        joker_matches: ctx.joker_matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_cards, GameConfig};

    fn table() -> ScoreTable {
        ScoreTable::from_rules(&GameConfig::standard().hands).unwrap()
    }

    #[test]
    fn seed_sets_multiplier() {
        let cards = parse_cards("KH KD").unwrap();
        let res = resolve(&cards, &table(), None, &[], &RoundRule::default()).unwrap();
        assert_eq!(res.kind, Some(HandKind::OnePair));
        assert_eq!(res.steps.len(), 2);
        assert_eq!(res.steps[1].effect, ScoreEffect::SetMult(2));
        assert_eq!(res.total, 20);
    }

    #[test]
    fn card_points_count_contributing_cards_only() {
        let cards = parse_cards("KH KD 2C").unwrap();
        let rules = RoundRule {
            add_card_points: true,
            ..RoundRule::default()
        };
        let res = resolve(&cards, &table(), None, &[], &rules).unwrap();
        assert_eq!(res.score.hand_score, 10 + 10 + 10);
        assert_eq!(res.total, 60);
    }

    #[test]
    fn preview_shows_base() {
        let cards = parse_cards("AS").unwrap();
        let preview = preview(&cards, &table());
        assert_eq!(preview.kind, Some(HandKind::HighCard));
        assert_eq!(preview.base.total(), 5);
    }
}
