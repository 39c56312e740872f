use super::helpers::{normalize_indices, pick_cards, take_cards};
use super::*;
use crate::*;
use std::str::FromStr;

/// Display order for the held hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Rank,
    Suit,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "rank" => Ok(SortKey::Rank),
            "suit" => Ok(SortKey::Suit),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

impl RunState {
    /// Draws until the hand holds `hand_size` cards, recycling the discard
    /// pile when the draw pile runs dry.
    pub fn draw_to_hand(&mut self, events: &mut EventBus) {
        let mut count = self.state.hand_size.saturating_sub(self.hand.len());
        let mut total_drawn = 0;
        while count > 0 {
            if self.deck.is_empty() {
                self.deck.reshuffle_discard(&mut self.rng);
                if self.deck.is_empty() {
                    break;
                }
            }
            let mut drawn = self.deck.draw_cards(count);
            count = count.saturating_sub(drawn.len());
            total_drawn += drawn.len();
            self.hand.append(&mut drawn);
        }
        if total_drawn > 0 {
            events.push(Event::HandDealt { count: total_drawn });
        }
    }

    pub fn play_hand(
        &mut self,
        indices: &[usize],
        events: &mut EventBus,
    ) -> Result<HandResolution, RunError> {
        if self.state.phase != Phase::AwaitingPlay {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if indices.is_empty() {
            return Err(RunError::EmptyPlay);
        }
        let selected = normalize_indices(indices, self.hand.len())?;
        if selected.len() > self.config.round.max_play {
            return Err(RunError::InvalidCardCount);
        }
        if self.state.hands_left == 0 {
            return Err(RunError::NoHandsLeft);
        }

        let played = pick_cards(&self.hand, &selected);
        let resolved = {
            let jokers = self.active_jokers()?;
            pipeline::resolve(
                &played,
                &self.table,
                self.active_debuff(),
                &jokers,
                &self.config.round,
            )
        };
        self.set_phase(Phase::Resolving, events);
        let resolution = match resolved {
            Ok(resolution) => resolution,
            Err(rejected) => {
                log::warn!("{rejected} ({} cards played)", played.len());
                self.set_phase(Phase::AwaitingPlay, events);
                events.push(Event::PlayRejected {
                    debuff: rejected.debuff,
                    cards: played.len(),
                });
                return Err(RunError::Rejected(rejected.debuff));
            }
        };

        let played = take_cards(&mut self.hand, &selected);
        self.deck.discard(played);
        self.state.hands_left = self.state.hands_left.saturating_sub(1);
        self.state.score = self.state.score.saturating_add(resolution.total);
        self.state.last_hand = resolution.kind;
        self.set_phase(Phase::Scored, events);
        log::info!(
            "scored {}: {} x {} = {} ({} / {})",
            resolution
                .kind
                .map_or("nothing", |kind| self.config.hand_name(kind)),
            resolution.score.hand_score,
            resolution.score.multiplier,
            resolution.total,
            self.state.score,
            self.state.target
        );
        events.push(Event::HandScored {
            hand: resolution.kind,
            hand_score: resolution.score.hand_score,
            multiplier: resolution.score.multiplier,
            total: resolution.total,
            round_score: self.state.score,
        });

        if let Some(outcome) = self.state.check_outcome() {
            self.finish_round(outcome, events);
        } else {
            self.draw_to_hand(events);
            self.set_phase(Phase::AwaitingPlay, events);
        }
        self.last_resolution = Some(resolution.clone());
        Ok(resolution)
    }

    pub fn discard(&mut self, indices: &[usize], events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::AwaitingPlay {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if self.state.discards_left == 0 {
            return Err(RunError::NoDiscardsLeft);
        }
        if indices.is_empty() {
            return Err(RunError::InvalidSelection);
        }
        let selected = normalize_indices(indices, self.hand.len())?;
        if selected.len() > self.config.round.max_play {
            return Err(RunError::InvalidCardCount);
        }
        let discarded = take_cards(&mut self.hand, &selected);
        let count = discarded.len();
        self.deck.discard(discarded);
        self.state.discards_left = self.state.discards_left.saturating_sub(1);
        events.push(Event::CardsDiscarded {
            count,
            discards_left: self.state.discards_left,
        });
        self.draw_to_hand(events);
        Ok(())
    }

    /// Category and base values of a tentative selection. Never mutates.
    pub fn preview(&self, indices: &[usize]) -> Result<Preview, RunError> {
        let selected = normalize_indices(indices, self.hand.len())?;
        if selected.len() > self.config.round.max_play {
            return Err(RunError::InvalidCardCount);
        }
        let cards = pick_cards(&self.hand, &selected);
        Ok(pipeline::preview(&cards, &self.table))
    }

    pub fn sort_hand(&mut self, key: SortKey) {
        match key {
            SortKey::Rank => sort_descending(&mut self.hand),
            SortKey::Suit => self
                .hand
                .sort_by(|a, b| b.suit.cmp(&a.suit).then(b.rank.cmp(&a.rank))),
        }
    }
}
