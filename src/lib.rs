pub mod cli;
pub mod core;
pub mod hints;
pub mod server;

// Re-export for convenience
pub use crate::core::{GameError, GameRng, GuessResult, RandomSource, Session};
pub use crate::server::{create_router, AppState, ServerConfig};
