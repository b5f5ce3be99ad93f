//! Display functions for game state

use super::formatters::{KEYBOARD_ROWS, board_emoji, colored_guess, letter_tile, status_line};
use crate::core::GuessResult;
use crate::game::{GameSession, GameStatus};
use colored::Colorize;

/// Print the board as colored tiles, unfilled rows included
pub fn print_board(session: &GameSession) {
    let width = session.word_length() * 3;
    println!("\n{}", "─".repeat(width + 4).cyan());
    for guess in session.guesses() {
        println!("  {}", colored_guess(guess.word().letters(), guess.result()));
    }
    for _ in session.guesses().len()..session.max_guesses() {
        println!("  {}", " · ".repeat(session.word_length()).bright_black());
    }
    println!("{}", "─".repeat(width + 4).cyan());
}

/// Print the emoji grid, as a chat message would show it
pub fn print_emoji_board(session: &GameSession) {
    for row in board_emoji(session) {
        println!("  {row}");
    }
}

/// Print the on-screen keyboard, letters colored by best verdict so far
pub fn print_keyboard(session: &GameSession) {
    let hints = session.letter_hints();
    for (indent, row) in KEYBOARD_ROWS.iter().enumerate() {
        let keys: String = row
            .bytes()
            .map(|letter| match hints.get(&char::from(letter)) {
                Some(&verdict) => letter_tile(letter, verdict).to_string(),
                None => format!(" {} ", char::from(letter).to_ascii_uppercase()),
            })
            .collect();
        println!("{}{keys}", " ".repeat(indent * 2 + 2));
    }
}

/// Print feedback for a single guess followed by the game status
pub fn print_guess_result(word: &str, result: &GuessResult, session: &GameSession) {
    println!(
        "\n{} {}",
        word.to_uppercase().bright_white().bold(),
        result.to_emoji()
    );
    print_status(session);
}

/// Print the status line, colored by outcome
pub fn print_status(session: &GameSession) {
    let line = status_line(session);
    match session.status() {
        GameStatus::Active => println!("{}", line.bright_white()),
        GameStatus::Won => println!("{}", format!("✅ {line}").green().bold()),
        GameStatus::Exhausted => println!("{}", format!("❌ {line}").red().bold()),
    }
}
