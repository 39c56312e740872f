use super::*;
use crate::*;

impl RunState {
    /// Permanently raises a category by one level. Free; used by rewards and
    /// by [`RunState::buy_hand_upgrade`].
    pub fn upgrade_hand(&mut self, kind: HandKind, events: &mut EventBus) -> u32 {
        let level = self.table.upgrade(kind);
        log::info!("{kind} upgraded to level {level}");
        events.push(Event::HandUpgraded { hand: kind, level });
        level
    }

    pub fn buy_hand_upgrade(
        &mut self,
        kind: HandKind,
        events: &mut EventBus,
    ) -> Result<u32, RunError> {
        let price = self.config.round.upgrade_price;
        if self.state.balance < price {
            return Err(RunError::NotEnoughMoney);
        }
        self.state.balance -= price;
        Ok(self.upgrade_hand(kind, events))
    }

    pub fn buy_joker(&mut self, def_id: &str, events: &mut EventBus) -> Result<JokerId, RunError> {
        let def = self.config.joker_def(def_id)?;
        if self.state.balance < def.price {
            return Err(RunError::NotEnoughMoney);
        }
        let id = self.inventory.add_joker(def)?;
        self.state.balance -= def.price;
        log::info!("bought {} #{id} for {}", def.id, def.price);
        events.push(Event::JokerBought {
            id,
            def_id: def.id.clone(),
            price: def.price,
            balance: self.state.balance,
        });
        Ok(id)
    }

    pub fn sell_joker(&mut self, index: usize, events: &mut EventBus) -> Result<i64, RunError> {
        if index >= self.inventory.jokers.len() {
            return Err(RunError::InvalidJokerIndex);
        }
        let joker = self.inventory.remove_joker(index)?;
        self.state.balance += joker.sell_value;
        log::info!("sold {} #{} for {}", joker.def_id, joker.id, joker.sell_value);
        events.push(Event::JokerSold {
            id: joker.id,
            def_id: joker.def_id,
            sell_value: joker.sell_value,
            balance: self.state.balance,
        });
        Ok(joker.sell_value)
    }

    /// Reorders owned jokers. Scoring follows the new order from the next hand.
    pub fn move_joker(&mut self, from: usize, to: usize) -> Result<(), RunError> {
        let len = self.inventory.jokers.len();
        if from >= len || to >= len {
            return Err(RunError::InvalidJokerIndex);
        }
        self.inventory.move_joker(from, to)?;
        Ok(())
    }
}
