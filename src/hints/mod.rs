//! Hint generation - range narrowing from guess history plus canned phrasing
pub mod generator;
pub mod templates;

pub use generator::{
    binary_search_hint, encouragement_hint, generate_hint, hint_bounds, search_bounds,
    strategy_hint, suggest_binary_search_guess, Bounds, SuggestedRange,
};
