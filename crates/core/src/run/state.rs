use super::*;
use crate::*;

impl RunState {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, RunError> {
        config.validate()?;
        let table = ScoreTable::from_rules(&config.hands)?;
        let mut rng = RngState::from_seed(seed);
        let mut deck = Deck::standard52();
        deck.shuffle(&mut rng);
        let inventory = Inventory::with_slots(config.round.joker_slots);
        let state = GameState::new(&config.round);
        Ok(Self {
            config,
            table,
            inventory,
            rng,
            deck,
            hand: Vec::new(),
            state,
            dealer: None,
            last_resolution: None,
        })
    }

    pub fn active_debuff(&self) -> Option<DebuffKind> {
        self.dealer.and_then(|dealer| dealer.debuff)
    }

    pub(super) fn set_phase(&mut self, to: Phase, events: &mut EventBus) {
        let from = self.state.phase;
        if from == to {
            return;
        }
        log::debug!("phase {from:?} -> {to:?}");
        self.state.phase = to;
        events.push(Event::PhaseChanged { from, to });
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.state.phase {
            Phase::RoundOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Owned jokers paired with their definitions, in acquisition order.
    pub fn active_jokers(&self) -> Result<Vec<ActiveJoker<'_>>, RunError> {
        let mut jokers = Vec::with_capacity(self.inventory.jokers.len());
        for joker in &self.inventory.jokers {
            let def = self.config.joker_def(&joker.def_id)?;
            jokers.push(ActiveJoker { id: joker.id, def });
        }
        Ok(jokers)
    }
}
