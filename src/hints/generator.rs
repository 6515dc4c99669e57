use std::fmt;

use crate::core::game::{guess_statistics, MAX_NUMBER, MIN_NUMBER};
use crate::core::rng::{choose, RandomSource};
use crate::hints::templates;

/// Guess value the binary-search hint falls back to before any guess.
pub const OPENING_SUGGESTION: u32 = 50;

/// Inferred edges of the plausible range, from guess history.
///
/// Signed so a degenerate range (`lower >= upper`) renders without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub lower: i64,
    pub upper: i64,
}

impl Bounds {
    /// Values strictly between the bounds. May be empty or inverted.
    pub fn suggested_range(&self) -> SuggestedRange {
        SuggestedRange {
            start: self.lower + 1,
            end: self.upper - 1,
        }
    }

    pub fn midpoint(&self) -> i64 {
        (self.lower + self.upper).div_euclid(2)
    }

    fn from_history(
        guesses: &[u32],
        secret_number: u32,
        default_lower: i64,
        default_upper: i64,
    ) -> Self {
        let lower = guesses
            .iter()
            .filter(|&&g| g < secret_number)
            .max()
            .map_or(default_lower, |&g| i64::from(g));
        let upper = guesses
            .iter()
            .filter(|&&g| g > secret_number)
            .min()
            .map_or(default_upper, |&g| i64::from(g));
        Self { lower, upper }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedRange {
    pub start: i64,
    pub end: i64,
}

impl fmt::Display for SuggestedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Bounds used when phrasing a hint for `current_guess`.
///
/// The defaults differ by branch: a too-high guess falls back to `MIN_NUMBER`
/// below and the guess itself above, a too-low guess falls back to the guess
/// itself below and `MAX_NUMBER` above.
pub fn hint_bounds(current_guess: u32, secret_number: u32, guesses: &[u32]) -> Bounds {
    let current = i64::from(current_guess);
    if current_guess > secret_number {
        Bounds::from_history(guesses, secret_number, i64::from(MIN_NUMBER), current)
    } else {
        Bounds::from_history(guesses, secret_number, current, i64::from(MAX_NUMBER))
    }
}

/// Bounds for the binary-search suggestion, defaulting to the full range.
pub fn search_bounds(guesses: &[u32], secret_number: u32) -> Bounds {
    Bounds::from_history(
        guesses,
        secret_number,
        i64::from(MIN_NUMBER),
        i64::from(MAX_NUMBER),
    )
}

/// Templated hint for the guess just made.
///
/// `guesses_so_far` includes `current_guess`. The first guess always gets an
/// opening-strategy hint.
pub fn generate_hint<R: RandomSource + ?Sized>(
    current_guess: u32,
    secret_number: u32,
    guesses_so_far: &[u32],
    rng: &mut R,
) -> String {
    if guesses_so_far.len() == 1 {
        return choose(rng, &templates::OPENING).to_string();
    }

    let range = hint_bounds(current_guess, secret_number, guesses_so_far)
        .suggested_range()
        .to_string();
    let bucket: &[&str] = if current_guess > secret_number {
        &templates::TOO_HIGH
    } else {
        &templates::TOO_LOW
    };
    templates::render(choose(rng, bucket), &range, current_guess)
}

/// Midpoint of the current search range, or `OPENING_SUGGESTION` with no guesses.
pub fn suggest_binary_search_guess(guesses_so_far: &[u32], secret_number: u32) -> u32 {
    if guesses_so_far.is_empty() {
        return OPENING_SUGGESTION;
    }
    // both bounds are valid guesses, so the midpoint is too
    search_bounds(guesses_so_far, secret_number).midpoint() as u32
}

pub fn binary_search_hint(guesses_so_far: &[u32], secret_number: u32) -> String {
    if guesses_so_far.is_empty() {
        return templates::BINARY_SEARCH_OPENING.to_string();
    }
    let bounds = search_bounds(guesses_so_far, secret_number);
    format!(
        "Try guessing {}! This is the middle of your current search range ({}-{}).",
        suggest_binary_search_guess(guesses_so_far, secret_number),
        bounds.lower,
        bounds.upper
    )
}

/// Advice based on how far, on average, the guesses landed from the secret.
pub fn strategy_hint(guesses_so_far: &[u32], secret_number: u32) -> &'static str {
    if guesses_so_far.len() < 2 {
        return templates::STRATEGY_TOO_FEW;
    }

    let average = guess_statistics(guesses_so_far, secret_number).average_difference;
    if average > 30.0 {
        templates::STRATEGY_FAR
    } else if average < 10.0 {
        templates::STRATEGY_CLOSE
    } else {
        templates::STRATEGY_PROGRESS
    }
}

pub fn encouragement_hint(attempts: u32) -> &'static str {
    match attempts {
        0..=3 => templates::ENCOURAGE_START,
        4..=6 => templates::ENCOURAGE_PROGRESS,
        7..=10 => templates::ENCOURAGE_CLOSER,
        _ => templates::ENCOURAGE_PERSIST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game::check_guess;
    use crate::core::rng::GameRng;
    use proptest::prelude::*;

    /// Always picks the same template index.
    struct FixedChoice(usize);

    impl RandomSource for FixedChoice {
        fn number_in(&mut self, range: std::ops::RangeInclusive<u32>) -> u32 {
            *range.start()
        }

        fn pick_index(&mut self, len: usize) -> usize {
            self.0 % len
        }
    }

    #[test]
    fn first_guess_gets_opening_template() {
        let mut rng = GameRng::seeded(5);
        for guess in [1, 37, 50, 99] {
            let hint = generate_hint(guess, 42, &[guess], &mut rng);
            assert!(templates::OPENING.contains(&hint.as_str()), "{hint}");
        }
    }

    #[test]
    fn too_high_hint_interpolates_range() {
        let hint = generate_hint(75, 50, &[25, 75], &mut FixedChoice(1));
        assert_eq!(
            hint,
            "The number is definitely lower. Consider guessing in the 26-74 range."
        );
        let hint = generate_hint(75, 50, &[25, 75], &mut FixedChoice(2));
        assert_eq!(hint, "Good narrowing down! The secret number is below 75.");
    }

    #[test]
    fn too_low_hint_interpolates_range() {
        let hint = generate_hint(30, 50, &[80, 30], &mut FixedChoice(1));
        assert_eq!(
            hint,
            "The number is higher than that. Try something in the 31-79 range."
        );
        let hint = generate_hint(30, 50, &[80, 30], &mut FixedChoice(2));
        assert_eq!(hint, "Getting warmer! The secret number is above 30.");
    }

    #[test]
    fn hint_bounds_keep_branch_defaults() {
        // too high with no low guesses: lower defaults to 1
        assert_eq!(hint_bounds(80, 50, &[90, 80]), Bounds { lower: 1, upper: 80 });
        // too low with no high guesses: upper defaults to 100
        assert_eq!(hint_bounds(20, 50, &[10, 20]), Bounds { lower: 20, upper: 100 });
        // current guess outside the history falls back to itself
        assert_eq!(hint_bounds(70, 50, &[]), Bounds { lower: 1, upper: 70 });
        assert_eq!(hint_bounds(30, 50, &[]), Bounds { lower: 30, upper: 100 });
    }

    #[test]
    fn degenerate_range_is_rendered_as_is() {
        let bounds = hint_bounds(51, 50, &[49, 51]);
        assert_eq!(bounds.suggested_range().to_string(), "50-50");
        let hint = generate_hint(2, 1, &[2, 2], &mut FixedChoice(1));
        assert_eq!(
            hint,
            "The number is definitely lower. Consider guessing in the 2-1 range."
        );
    }

    #[test]
    fn binary_search_suggestion() {
        assert_eq!(suggest_binary_search_guess(&[], 42), 50);
        assert_eq!(suggest_binary_search_guess(&[50], 42), 25);
        assert_eq!(suggest_binary_search_guess(&[50, 25], 42), 37);
        assert_eq!(suggest_binary_search_guess(&[10], 42), 55);
        assert_eq!(
            binary_search_hint(&[50, 25], 42),
            "Try guessing 37! This is the middle of your current search range (25-50)."
        );
        assert_eq!(binary_search_hint(&[], 42), templates::BINARY_SEARCH_OPENING);
    }

    #[test]
    fn strategy_thresholds() {
        assert_eq!(strategy_hint(&[10], 50), templates::STRATEGY_TOO_FEW);
        assert_eq!(strategy_hint(&[1, 100], 50), templates::STRATEGY_FAR);
        assert_eq!(strategy_hint(&[45, 55], 50), templates::STRATEGY_CLOSE);
        assert_eq!(strategy_hint(&[30, 70], 50), templates::STRATEGY_PROGRESS);
        // boundaries: exactly 10 and exactly 30 are both "progress"
        assert_eq!(strategy_hint(&[40, 60], 50), templates::STRATEGY_PROGRESS);
        assert_eq!(strategy_hint(&[20, 80], 50), templates::STRATEGY_PROGRESS);
    }

    #[test]
    fn encouragement_thresholds() {
        assert_eq!(encouragement_hint(0), templates::ENCOURAGE_START);
        assert_eq!(encouragement_hint(3), templates::ENCOURAGE_START);
        assert_eq!(encouragement_hint(4), templates::ENCOURAGE_PROGRESS);
        assert_eq!(encouragement_hint(6), templates::ENCOURAGE_PROGRESS);
        assert_eq!(encouragement_hint(7), templates::ENCOURAGE_CLOSER);
        assert_eq!(encouragement_hint(10), templates::ENCOURAGE_CLOSER);
        assert_eq!(encouragement_hint(11), templates::ENCOURAGE_PERSIST);
    }

    proptest! {
        #[test]
        fn hints_are_deterministic_under_seed(
            seed in any::<u64>(),
            secret in 1u32..=100,
            guesses in proptest::collection::vec(1u32..=100, 1..10),
        ) {
            let current = *guesses.last().unwrap();
            let a = generate_hint(current, secret, &guesses, &mut GameRng::seeded(seed));
            let b = generate_hint(current, secret, &guesses, &mut GameRng::seeded(seed));
            prop_assert_eq!(a, b);
        }

        #[test]
        fn bounds_narrow_monotonically(
            secret in 1u32..=100,
            guesses in proptest::collection::vec(1u32..=100, 1..20),
        ) {
            let mut history = Vec::new();
            let mut previous: Option<Bounds> = None;
            for g in guesses {
                if check_guess(g, secret).correct {
                    break;
                }
                history.push(g);
                let bounds = hint_bounds(g, secret, &history);
                if let Some(prev) = previous {
                    prop_assert!(bounds.lower >= prev.lower);
                    prop_assert!(bounds.upper <= prev.upper);
                }
                previous = Some(bounds);
            }
        }

        #[test]
        fn binary_suggestion_stays_in_range(
            secret in 1u32..=100,
            guesses in proptest::collection::vec(1u32..=100, 0..20),
        ) {
            let n = suggest_binary_search_guess(&guesses, secret);
            prop_assert!((MIN_NUMBER..=MAX_NUMBER).contains(&n));
        }
    }
}
