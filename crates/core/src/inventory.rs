use crate::JokerDef;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Run-unique joker handle. Two copies of the same joker definition always
/// get different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JokerId(pub u64);

impl fmt::Display for JokerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JokerInstance {
    pub id: JokerId,
    pub def_id: String,
    #[serde(default)]
    pub sell_value: i64,
}

/// Owned jokers in acquisition order. Order is significant to scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub joker_slots: usize,
    pub jokers: Vec<JokerInstance>,
    next_id: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("no joker slots")]
    NoJokerSlots,
    #[error("invalid joker index {0}")]
    InvalidJokerIndex(usize),
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::with_slots(5)
    }

    pub fn with_slots(joker_slots: usize) -> Self {
        Self {
            joker_slots,
            jokers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn is_full(&self) -> bool {
        self.jokers.len() >= self.joker_slots
    }

    pub fn add_joker(&mut self, def: &JokerDef) -> Result<JokerId, InventoryError> {
        if self.is_full() {
            return Err(InventoryError::NoJokerSlots);
        }
        let id = self.alloc_id();
        self.jokers.push(JokerInstance {
            id,
            def_id: def.id.clone(),
            sell_value: def.sell_value,
        });
        Ok(id)
    }

    pub fn remove_joker(&mut self, index: usize) -> Result<JokerInstance, InventoryError> {
        if index >= self.jokers.len() {
            return Err(InventoryError::InvalidJokerIndex(index));
        }
        Ok(self.jokers.remove(index))
    }

    /// Moves the joker at `from` so that it ends up at `to`, shifting the rest.
    pub fn move_joker(&mut self, from: usize, to: usize) -> Result<(), InventoryError> {
        let len = self.jokers.len();
        if from >= len {
            return Err(InventoryError::InvalidJokerIndex(from));
        }
        if to >= len {
            return Err(InventoryError::InvalidJokerIndex(to));
        }
        let joker = self.jokers.remove(from);
        self.jokers.insert(to, joker);
        Ok(())
    }

    fn alloc_id(&mut self) -> JokerId {
        let id = JokerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }
}
