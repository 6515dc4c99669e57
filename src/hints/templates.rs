//! Canned hint phrasings and placeholder rendering

pub const RANGE_PLACEHOLDER: &str = "{suggested_range}";
pub const GUESS_PLACEHOLDER: &str = "{current_guess}";

/// Shown after the very first guess, whatever its value
pub const OPENING: [&str; 3] = [
    "Try starting with a number in the middle range (40-60) to narrow down quickly!",
    "A good strategy is to start with 50 and then adjust based on the feedback.",
    "Consider using the binary search approach - start with 50!",
];

pub const TOO_HIGH: [&str; 3] = [
    "You're getting closer! Try a number in the lower half of your current range.",
    "The number is definitely lower. Consider guessing in the {suggested_range} range.",
    "Good narrowing down! The secret number is below {current_guess}.",
];

pub const TOO_LOW: [&str; 3] = [
    "You're on the right track! Try a number in the upper half of your current range.",
    "The number is higher than that. Try something in the {suggested_range} range.",
    "Getting warmer! The secret number is above {current_guess}.",
];

pub const BINARY_SEARCH_OPENING: &str =
    "Try starting with 50! This is the middle of the range and will help you eliminate half the possibilities.";

pub const STRATEGY_TOO_FEW: &str =
    "Try to use each guess to eliminate half of the remaining possibilities!";
pub const STRATEGY_FAR: &str =
    "Your guesses are quite far from the target. Try to use the feedback more systematically!";
pub const STRATEGY_CLOSE: &str =
    "You're getting very close! Try to be more precise with your next guess.";
pub const STRATEGY_PROGRESS: &str = "You're making good progress. Keep narrowing down the range!";

pub const ENCOURAGE_START: &str = "Great start! You're learning about the number's location.";
pub const ENCOURAGE_PROGRESS: &str =
    "You're making good progress! Keep using the feedback wisely.";
pub const ENCOURAGE_CLOSER: &str = "You're getting closer! Don't give up now.";
pub const ENCOURAGE_PERSIST: &str = "Persistence pays off! You're narrowing it down.";

/// Fill in the range and guess placeholders of a template
pub fn render(template: &str, suggested_range: &str, current_guess: u32) -> String {
    template
        .replace(RANGE_PLACEHOLDER, suggested_range)
        .replace(GUESS_PLACEHOLDER, &current_guess.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fills_both_placeholders() {
        assert_eq!(
            render("{suggested_range} / {current_guess}", "26-74", 75),
            "26-74 / 75"
        );
    }

    #[test]
    fn render_leaves_plain_templates_alone() {
        assert_eq!(render(TOO_HIGH[0], "1-2", 3), TOO_HIGH[0]);
    }
}
