use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use crate::core::error::GameError;
use crate::core::rng::RandomSource;

/// Smallest number the secret (and a guess) can be.
pub const MIN_NUMBER: u32 = 1;
/// Largest number the secret (and a guess) can be.
pub const MAX_NUMBER: u32 = 100;

const INVALID_NUMBER: &str = "Guess must be a valid number";
const GUESS_REQUIRED: &str = "Guess is required";

/// How a guess compares to the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessOutcome {
    Correct,
    TooLow,
    TooHigh,
}

/// Feedback for a single guess. Not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub outcome: GuessOutcome,
    pub correct: bool,
    pub message: String,
}

/// Compare a guess against the secret. Pure.
pub fn check_guess(guess: u32, secret_number: u32) -> GuessResult {
    let (outcome, message) = match guess.cmp(&secret_number) {
        Ordering::Equal => (
            GuessOutcome::Correct,
            "Correct! You found the number!".to_string(),
        ),
        Ordering::Less => (
            GuessOutcome::TooLow,
            format!("Too low! The number is higher than {}.", guess),
        ),
        Ordering::Greater => (
            GuessOutcome::TooHigh,
            format!("Too high! The number is lower than {}.", guess),
        ),
    };

    GuessResult {
        correct: outcome == GuessOutcome::Correct,
        outcome,
        message,
    }
}

/// Validate raw guess input from a request body.
///
/// Integers (and whole floats) are taken as-is, strings are trimmed and parsed.
/// Anything else, or a number outside `MIN_NUMBER..=MAX_NUMBER`, is rejected.
pub fn validate_guess(raw: &Value) -> Result<u32, GameError> {
    let parsed = match raw {
        Value::Null => return Err(GameError::validation(GUESS_REQUIRED)),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    let guess = parsed.ok_or_else(|| GameError::validation(INVALID_NUMBER))?;
    check_range(guess)
}

/// Same as [`validate_guess`] for plain text input.
pub fn validate_guess_text(raw: &str) -> Result<u32, GameError> {
    let guess = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| GameError::validation(INVALID_NUMBER))?;
    check_range(guess)
}

fn check_range(guess: i64) -> Result<u32, GameError> {
    if guess < i64::from(MIN_NUMBER) || guess > i64::from(MAX_NUMBER) {
        return Err(GameError::validation(format!(
            "Guess must be between {} and {}",
            MIN_NUMBER, MAX_NUMBER
        )));
    }
    Ok(guess as u32)
}

/// Per-player game state for one play-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    secret_number: u32,
    guesses: Vec<u32>,
    active: bool,
}

impl Session {
    /// Start a new game with a secret drawn uniformly from `MIN_NUMBER..=MAX_NUMBER`.
    pub fn start<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::with_secret(rng.number_in(MIN_NUMBER..=MAX_NUMBER))
    }

    /// Start a new game with a known secret.
    pub fn with_secret(secret_number: u32) -> Self {
        Self {
            secret_number,
            guesses: Vec::new(),
            active: true,
        }
    }

    pub fn secret_number(&self) -> u32 {
        self.secret_number
    }

    pub fn guesses(&self) -> &[u32] {
        &self.guesses
    }

    /// Number of guesses made. Always equal to `guesses().len()`.
    pub fn attempts(&self) -> u32 {
        self.guesses.len() as u32
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Record an already validated guess and return its feedback.
    ///
    /// A correct guess ends the game; guessing on a finished game is a state error.
    pub fn record_guess(&mut self, guess: u32) -> Result<GuessResult, GameError> {
        if !self.active {
            return Err(GameError::no_active_game());
        }

        self.guesses.push(guess);
        let result = check_guess(guess, self.secret_number);
        if result.correct {
            self.active = false;
        }
        Ok(result)
    }

    pub fn statistics(&self) -> GuessStatistics {
        guess_statistics(&self.guesses, self.secret_number)
    }
}

/// Summary of how far a guess history landed from the secret.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessStatistics {
    pub total_guesses: usize,
    pub closest_guess: Option<u32>,
    pub furthest_guess: Option<u32>,
    pub average_difference: f64,
}

pub fn calculate_difference(guess: u32, secret_number: u32) -> u32 {
    guess.abs_diff(secret_number)
}

pub fn guess_statistics(guesses: &[u32], secret_number: u32) -> GuessStatistics {
    if guesses.is_empty() {
        return GuessStatistics {
            total_guesses: 0,
            closest_guess: None,
            furthest_guess: None,
            average_difference: 0.0,
        };
    }

    let mut closest = guesses[0];
    let mut furthest = guesses[0];
    let mut total: u64 = 0;
    for &g in guesses {
        let diff = calculate_difference(g, secret_number);
        // strict comparisons keep the earliest guess on ties
        if diff < calculate_difference(closest, secret_number) {
            closest = g;
        }
        if diff > calculate_difference(furthest, secret_number) {
            furthest = g;
        }
        total += u64::from(diff);
    }

    GuessStatistics {
        total_guesses: guesses.len(),
        closest_guess: Some(closest),
        furthest_guess: Some(furthest),
        average_difference: total as f64 / guesses.len() as f64,
    }
}

/// Whether `guess` is consistent with the feedback from earlier guesses.
pub fn is_guess_reasonable(guess: u32, previous_guesses: &[u32], secret_number: u32) -> bool {
    previous_guesses.iter().all(|&prev| {
        if prev < secret_number {
            guess > prev
        } else if prev > secret_number {
            guess < prev
        } else {
            true
        }
    })
}
