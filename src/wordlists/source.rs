//! Where a game's solution comes from
//!
//! A source hands out `{ solution, display_date }` for a new game. The
//! engine only checks the word's length and letters; freshness is the
//! source's business.

use crate::core::Word;
use jiff::civil::{Date, date};
use rand::seq::IndexedRandom;

/// First day of the daily puzzle; day zero of [`DailyWordList`]
pub const PUZZLE_EPOCH: Date = date(2021, 6, 19);

/// The word for one game, and the date it is shown under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySolution {
    pub solution: String,
    pub display_date: String,
}

/// Supplies solutions for new games
pub trait SolutionSource {
    /// The solution to use for a game started on `date`
    ///
    /// Returns `None` if the source has nothing to offer.
    fn solution_for(&self, date: Date) -> Option<DailySolution>;
}

/// Same word for every date
#[derive(Debug, Clone)]
pub struct FixedSolution {
    word: Word,
}

impl FixedSolution {
    #[must_use]
    pub fn new(word: Word) -> Self {
        Self { word }
    }
}

impl SolutionSource for FixedSolution {
    fn solution_for(&self, date: Date) -> Option<DailySolution> {
        Some(DailySolution {
            solution: self.word.text().to_string(),
            display_date: date.to_string(),
        })
    }
}

/// One word per calendar day, walking a word list from [`PUZZLE_EPOCH`]
///
/// Everyone asking for the same date gets the same word, without any
/// network access.
#[derive(Debug, Clone)]
pub struct DailyWordList {
    words: Vec<Word>,
}

impl DailyWordList {
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    fn index_for(&self, date: Date) -> Option<usize> {
        if self.words.is_empty() {
            return None;
        }
        let days = i64::from(PUZZLE_EPOCH.until(date).ok()?.get_days());
        let len = i64::try_from(self.words.len()).ok()?;
        usize::try_from(days.rem_euclid(len)).ok()
    }
}

impl SolutionSource for DailyWordList {
    fn solution_for(&self, date: Date) -> Option<DailySolution> {
        let word = &self.words[self.index_for(date)?];
        Some(DailySolution {
            solution: word.text().to_string(),
            display_date: date.to_string(),
        })
    }
}

/// A random word from a list, whatever the date
#[derive(Debug, Clone)]
pub struct RandomWordList {
    words: Vec<Word>,
}

impl RandomWordList {
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }
}

impl SolutionSource for RandomWordList {
    fn solution_for(&self, date: Date) -> Option<DailySolution> {
        let word = self.words.choose(&mut rand::rng())?;
        Some(DailySolution {
            solution: word.text().to_string(),
            display_date: date.to_string(),
        })
    }
}
