use super::*;
use crate::*;

impl RunState {
    /// Sets up a fresh round against `dealer_kind` at `level`. Fails without
    /// touching state when the level has no target.
    pub fn start_round(
        &mut self,
        level: u8,
        dealer_kind: DealerKind,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        let dealer = Dealer::roll(&self.config, level, dealer_kind, &mut self.rng)?;
        let rules = &self.config.round;

        self.state.level = level;
        self.state.target = dealer.target_score;
        self.state.score = 0;
        self.state.hands_left = rules.hands;
        self.state.discards_left = rules.discards;
        self.state.hand_size = rules.hand_size;
        self.state.last_hand = None;
        self.dealer = Some(dealer);
        self.last_resolution = None;
        self.hand.clear();
        self.deck.reset(&mut self.rng);

        log::info!(
            "round started: level {level}, {:?}, target {}, debuff {:?}",
            dealer.kind,
            dealer.target_score,
            dealer.debuff
        );
        events.push(Event::RoundStarted {
            level,
            dealer: dealer.kind,
            target: dealer.target_score,
            debuff: dealer.debuff,
            hands: self.state.hands_left,
            discards: self.state.discards_left,
        });

        self.draw_to_hand(events);
        self.set_phase(Phase::AwaitingPlay, events);
        Ok(())
    }

    pub(super) fn finish_round(&mut self, outcome: RoundOutcome, events: &mut EventBus) {
        self.set_phase(Phase::RoundOver(outcome), events);
        match outcome {
            RoundOutcome::Won => {
                let dealer_reward = self.dealer.map_or(0, |dealer| dealer.reward);
                let reward = dealer_reward + i64::from(self.state.hands_left);
                self.state.balance += reward;
                self.state.rounds_won = self.state.rounds_won.saturating_add(1);
                log::info!(
                    "round won: {} > {}, reward {reward}",
                    self.state.score,
                    self.state.target
                );
                events.push(Event::RoundWon {
                    score: self.state.score,
                    reward,
                    balance: self.state.balance,
                });
            }
            RoundOutcome::Lost => {
                log::info!("round lost: {} / {}", self.state.score, self.state.target);
                events.push(Event::RoundLost {
                    score: self.state.score,
                    target: self.state.target,
                });
            }
        }
    }
}
