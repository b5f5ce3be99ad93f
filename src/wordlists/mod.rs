//! Word lists and solution sources
//!
//! The embedded answer list feeds the offline solution sources; the loader
//! reads custom lists from disk.

mod embedded;
pub mod loader;
pub mod source;

pub use embedded::{ANSWERS, ANSWERS_COUNT};
pub use source::{
    DailySolution, DailyWordList, FixedSolution, PUZZLE_EPOCH, RandomWordList, SolutionSource,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_count_matches_const() {
        assert_eq!(ANSWERS.len(), ANSWERS_COUNT);
    }

    #[test]
    fn answers_are_valid_words() {
        for &word in ANSWERS {
            assert_eq!(word.len(), 5, "Word '{word}' is not 5 letters");
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "Word '{word}' contains non-lowercase chars"
            );
        }
    }

    #[test]
    fn answers_have_no_duplicates() {
        let unique: std::collections::HashSet<_> = ANSWERS.iter().collect();
        assert_eq!(unique.len(), ANSWERS.len());
    }
}
