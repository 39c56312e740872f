//! Rule loading and validation for deckbound assets.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
