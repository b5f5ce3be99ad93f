//! Guess evaluation: per-letter verdicts for a guess against a solution
//!
//! Each letter of a guess receives one of three verdicts:
//! - `Exact` (green): same letter at the same position in the solution
//! - `Present` (yellow): letter occurs elsewhere and is not yet used up
//! - `Absent` (gray): letter does not occur, or all occurrences are used up

use super::Word;
use crate::error::GameError;
use std::fmt;

/// Feedback for a single letter position
///
/// Variants are ordered by strength so the best verdict for a letter can be
/// picked with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LetterVerdict {
    Absent,
    Present,
    Exact,
}

impl LetterVerdict {
    /// Emoji square used in chat-style grids
    #[must_use]
    pub const fn to_emoji(self) -> char {
        match self {
            Self::Exact => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    /// Single ASCII symbol: `G`, `Y` or `-`
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Exact => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }
}

/// Verdicts for one guess, one per letter position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuessResult {
    verdicts: Vec<LetterVerdict>,
}

impl GuessResult {
    /// Evaluate `guess` against `solution`
    ///
    /// Implements Wordle's feedback rules, including duplicate letters.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches and remove them from the available pool
    /// 2. Second pass, left to right: mark present letters while the pool lasts;
    ///    earlier positions win when the guess repeats a letter more often than
    ///    the solution does
    ///
    /// # Errors
    /// Returns `GameError::InvalidLength` if the words differ in length.
    ///
    /// # Examples
    /// ```
    /// use wordle_thread::core::{GuessResult, LetterVerdict::*, Word};
    ///
    /// let solution = Word::new("allow").unwrap();
    /// let guess = Word::new("lulls").unwrap();
    /// let result = GuessResult::evaluate(&solution, &guess).unwrap();
    ///
    /// assert_eq!(result.verdicts(), &[Present, Absent, Exact, Absent, Absent]);
    /// assert!(!result.is_winning_guess());
    /// ```
    pub fn evaluate(solution: &Word, guess: &Word) -> Result<Self, GameError> {
        if guess.len() != solution.len() {
            return Err(GameError::InvalidLength {
                expected: solution.len(),
                actual: guess.len(),
            });
        }

        let mut verdicts = vec![LetterVerdict::Absent; solution.len()];
        let mut available = solution.letter_counts();

        // First pass: exact position matches
        for (i, (&g, &s)) in guess.letters().iter().zip(solution.letters()).enumerate() {
            if g == s {
                verdicts[i] = LetterVerdict::Exact;
                if let Some(count) = available.get_mut(&g) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: present letters from whatever the exact pass left
        for (verdict, &letter) in verdicts.iter_mut().zip(guess.letters()) {
            if *verdict == LetterVerdict::Exact {
                continue;
            }
            if let Some(count) = available.get_mut(&letter)
                && *count > 0
            {
                *verdict = LetterVerdict::Present;
                *count -= 1;
            }
        }

        Ok(Self { verdicts })
    }

    /// Per-position verdicts, in guess order
    #[inline]
    #[must_use]
    pub fn verdicts(&self) -> &[LetterVerdict] {
        &self.verdicts
    }

    /// Number of positions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// True iff every position is `Exact`
    #[must_use]
    pub fn is_winning_guess(&self) -> bool {
        self.verdicts.iter().all(|&v| v == LetterVerdict::Exact)
    }

    /// Count positions with the given verdict
    #[must_use]
    pub fn count(&self, verdict: LetterVerdict) -> usize {
        self.verdicts.iter().filter(|&&v| v == verdict).count()
    }

    /// Render as a row of emoji squares, e.g. "🟨⬜🟩⬜⬜"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.verdicts.iter().map(|v| v.to_emoji()).collect()
    }
}

impl fmt::Display for GuessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for verdict in &self.verdicts {
            write!(f, "{}", verdict.symbol())?;
        }
        Ok(())
    }
}

/// Evaluate a guess against a solution
///
/// Free-function form of [`GuessResult::evaluate`].
///
/// # Errors
/// Returns `GameError::InvalidLength` if the words differ in length.
pub fn evaluate(solution: &Word, guess: &Word) -> Result<GuessResult, GameError> {
    GuessResult::evaluate(solution, guess)
}
