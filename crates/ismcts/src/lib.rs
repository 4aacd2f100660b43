//! Information Set Monte Carlo Tree Search over a cloneable game-state API.

mod config;
mod error;
mod game;
mod rng;
mod search;
mod stats;
mod tree;

pub use config::*;
pub use error::*;
pub use game::*;
pub use rng::*;
pub use search::*;
pub use stats::*;
pub use tree::*;
