pub mod error;
pub mod game;
pub mod rng;
pub mod session;

pub use error::GameError;
pub use game::{GuessOutcome, GuessResult, Session};
pub use rng::{GameRng, RandomSource};
