//! One-off evaluation of a guess against a solution

use crate::core::{GuessResult, Word, evaluate};
use crate::error::GameError;

/// Evaluate `guess` against `solution` without starting a game
///
/// # Errors
///
/// Returns an error if either word is invalid or their lengths differ.
pub fn check_guess(solution: &str, guess: &str) -> Result<GuessResult, GameError> {
    let solution =
        Word::new(solution).map_err(|e| GameError::Construction(format!("invalid solution: {e}")))?;
    let guess = Word::new(guess).map_err(|_| GameError::InvalidCharacters(guess.to_string()))?;
    evaluate(&solution, &guess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LetterVerdict::{Absent, Exact, Present};

    #[test]
    fn check_is_case_insensitive() {
        let result = check_guess("ALLOW", "Lulls").unwrap();
        assert_eq!(result.verdicts(), &[Present, Absent, Exact, Absent, Absent]);
    }

    #[test]
    fn check_rejects_bad_input() {
        assert!(matches!(
            check_guess("", "earth"),
            Err(GameError::Construction(_))
        ));
        assert!(matches!(
            check_guess("earth", "ear7h"),
            Err(GameError::InvalidCharacters(_))
        ));
        assert!(matches!(
            check_guess("earth", "ear"),
            Err(GameError::InvalidLength { .. })
        ));
    }
}
