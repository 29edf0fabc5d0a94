//! Round and session engine for a fill-in-the-blank party card game.
//! Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod catalog;
pub mod config;
pub mod deck;
pub mod events;
pub mod player;
pub mod registry;
pub mod rng;
pub mod session;
pub mod view;

pub use cards::*;
pub use catalog::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use player::*;
pub use registry::*;
pub use rng::*;
pub use session::*;
pub use view::*;
