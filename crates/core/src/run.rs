use crate::{
    ConfigError, Dealer, DebuffKind, Deck, GameConfig, GameState, HandResolution, Inventory,
    InventoryError, Phase, RngState, ScoreTable,
};
use thiserror::Error;

mod hand;
mod helpers;
mod round;
mod shop;
mod state;

pub use hand::SortKey;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("no cards selected")]
    EmptyPlay,
    #[error("invalid card count")]
    InvalidCardCount,
    #[error("invalid card selection")]
    InvalidSelection,
    #[error("no hands left")]
    NoHandsLeft,
    #[error("no discards left")]
    NoDiscardsLeft,
    #[error("play rejected: {0}")]
    Rejected(DebuffKind),
    #[error("not enough money")]
    NotEnoughMoney,
    #[error("invalid joker index")]
    InvalidJokerIndex,
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// A single player's run: owned jokers, hand levels, balance and the round
/// currently in progress.
#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub table: ScoreTable,
    pub inventory: Inventory,
    pub rng: RngState,
    pub deck: Deck,
    pub hand: Vec<crate::Card>,
    pub state: GameState,
    pub dealer: Option<Dealer>,
    pub last_resolution: Option<HandResolution>,
}
