//! Formatting utilities for terminal output

use crate::core::{GuessResult, LetterVerdict};
use crate::game::{GameSession, GameStatus};
use colored::{ColoredString, Colorize};

/// Cell drawn for a row that has no guess yet
pub const UNFILLED: char = '⬛';

/// On-screen keyboard layout
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// The whole board as emoji rows, one per allowed guess
///
/// Rows without a guess are drawn as unfilled cells, so the grid always has
/// `max_guesses` rows of `word_length` cells.
#[must_use]
pub fn board_emoji(session: &GameSession) -> Vec<String> {
    let unfilled = UNFILLED.to_string().repeat(session.word_length());
    let mut rows: Vec<String> = session
        .guesses()
        .iter()
        .map(|g| g.result().to_emoji())
        .collect();
    rows.resize(session.max_guesses(), unfilled);
    rows
}

/// A single letter tile, colored by verdict
#[must_use]
pub fn letter_tile(letter: u8, verdict: LetterVerdict) -> ColoredString {
    let text = format!(" {} ", char::from(letter).to_ascii_uppercase());
    match verdict {
        LetterVerdict::Exact => text.black().on_green().bold(),
        LetterVerdict::Present => text.black().on_yellow().bold(),
        LetterVerdict::Absent => text.white().on_bright_black(),
    }
}

/// A guessed word as colored tiles
#[must_use]
pub fn colored_guess(word: &[u8], result: &GuessResult) -> String {
    word.iter()
        .zip(result.verdicts())
        .map(|(&letter, &verdict)| letter_tile(letter, verdict).to_string())
        .collect()
}

/// Short human-readable status line
#[must_use]
pub fn status_line(session: &GameSession) -> String {
    match session.status() {
        GameStatus::Active => {
            let left = session.remaining_guesses();
            format!(
                "{left} {} left",
                if left == 1 { "guess" } else { "guesses" }
            )
        }
        GameStatus::Won => format!(
            "Solved in {}/{}",
            session.guesses().len(),
            session.max_guesses()
        ),
        GameStatus::Exhausted => format!(
            "Out of guesses. The word was {}",
            session.solution().text().to_uppercase()
        ),
    }
}

/// Share-style summary: "3/5" or "X/5", then the emoji rows without unfilled padding
#[must_use]
pub fn share_text(session: &GameSession, title: &str) -> String {
    let score = match session.status() {
        GameStatus::Won => session.guesses().len().to_string(),
        GameStatus::Exhausted => "X".to_string(),
        GameStatus::Active => "-".to_string(),
    };
    let mut text = format!("{title} {score}/{}", session.max_guesses());
    for guess in session.guesses() {
        text.push('\n');
        text.push_str(&guess.result().to_emoji());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(guesses: &[&str]) -> GameSession {
        let mut game = GameSession::new("earth").unwrap();
        for guess in guesses {
            game.submit_guess(guess).unwrap();
        }
        game
    }

    #[test]
    fn board_has_unfilled_rows() {
        let rows = board_emoji(&game_with(&["arise"]));
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], "🟨🟨⬜⬜🟨");
        assert_eq!(rows[1], "⬛⬛⬛⬛⬛");
        assert_eq!(rows[4], "⬛⬛⬛⬛⬛");
    }

    #[test]
    fn empty_board() {
        let rows = board_emoji(&game_with(&[]));
        assert!(rows.iter().all(|r| r == "⬛⬛⬛⬛⬛"));
    }

    #[test]
    fn status_lines() {
        assert_eq!(status_line(&game_with(&["arise"])), "4 guesses left");
        assert_eq!(
            status_line(&game_with(&["arise", "heart", "hater", "tears"])),
            "1 guess left"
        );
        assert_eq!(status_line(&game_with(&["arise", "earth"])), "Solved in 2/5");
        assert_eq!(
            status_line(&game_with(&["arise", "heart", "hater", "tears", "crane"])),
            "Out of guesses. The word was EARTH"
        );
    }

    #[test]
    fn share_text_for_win() {
        let text = share_text(&game_with(&["arise", "earth"]), "Wordle 2024-06-10");
        assert_eq!(text, "Wordle 2024-06-10 2/5\n🟨🟨⬜⬜🟨\n🟩🟩🟩🟩🟩");
    }

    #[test]
    fn share_text_for_loss() {
        let text = share_text(
            &game_with(&["arise", "heart", "hater", "tears", "crane"]),
            "Wordle",
        );
        assert!(text.starts_with("Wordle X/5\n"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn colored_guess_keeps_letters() {
        colored::control::set_override(false);
        let game = game_with(&["arise"]);
        let guess = &game.guesses()[0];
        let text = colored_guess(guess.word().letters(), guess.result());
        assert_eq!(text, " A  R  I  S  E ");
    }
}
