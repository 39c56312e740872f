use crate::{DealerKind, DebuffKind, HandKind, JokerId, Phase};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RoundStarted {
        level: u8,
        dealer: DealerKind,
        target: i64,
        debuff: Option<DebuffKind>,
        hands: u8,
        discards: u8,
    },
    PhaseChanged { from: Phase, to: Phase },
    HandDealt { count: usize },
    PlayRejected { debuff: DebuffKind, cards: usize },
    HandScored {
        hand: Option<HandKind>,
        hand_score: i64,
        multiplier: i64,
        total: i64,
        round_score: i64,
    },
    CardsDiscarded { count: usize, discards_left: u8 },
    RoundWon {
        score: i64,
        reward: i64,
        balance: i64,
    },
    RoundLost { score: i64, target: i64 },
    JokerBought {
        id: JokerId,
        def_id: String,
        price: i64,
        balance: i64,
    },
    JokerSold {
        id: JokerId,
        def_id: String,
        sell_value: i64,
        balance: i64,
    },
    HandUpgraded { hand: HandKind, level: u32 },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
