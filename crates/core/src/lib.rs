//! Rules engine for deckbound. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod dealer;
pub mod deck;
pub mod effects;
pub mod events;
pub mod hand;
pub mod inventory;
pub mod pipeline;
pub mod rng;
pub mod rules;
pub mod run;
pub mod scoring;
pub mod state;

pub use cards::*;
pub use config::*;
pub use dealer::*;
pub use deck::*;
pub use effects::*;
pub use events::*;
pub use hand::*;
pub use inventory::*;
pub use pipeline::*;
pub use rng::*;
pub use rules::*;
pub use run::*;
pub use scoring::*;
pub use state::*;
