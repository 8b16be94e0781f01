//! Core game rules. Keep this crate free of IO and platform concerns.

pub mod action;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod events;
pub mod invariants;
pub mod legal;
pub mod nobles;
pub mod payment;
pub mod rng;
pub mod state;
pub mod tokens;
pub mod validate;

pub use action::*;
pub use cards::*;
pub use config::*;
pub use deck::*;
pub use engine::*;
pub use events::*;
pub use invariants::*;
pub use legal::*;
pub use nobles::*;
pub use payment::*;
pub use rng::*;
pub use state::*;
pub use tokens::*;
pub use validate::*;
