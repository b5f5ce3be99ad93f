//! Simple interactive CLI mode
//!
//! Text-based game without TUI: type guesses, see colored tiles.

use crate::game::{GameSession, GameStatus};
use crate::output::formatters::share_text;
use crate::output::{print_board, print_guess_result, print_keyboard};
use crate::wordlists::SolutionSource;
use anyhow::{Context, Result};
use colored::Colorize;
use jiff::Zoned;
use std::io::{self, Write};

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if reading user input fails or the source cannot
/// supply a valid solution.
pub fn run_simple(source: &dyn SolutionSource, max_guesses: usize) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Wordle - Interactive Mode                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Guess the hidden word in {max_guesses} tries.");
    println!("  🟩 right letter, right spot   🟨 right letter, wrong spot   ⬜ not in the word");
    println!("Commands: 'quit' to exit, 'new' to give up and start over\n");

    loop {
        let mut game = new_game(source, max_guesses)?;
        print_board(&game);

        while game.is_active() {
            let Some(input) = get_user_input(&format!(
                "Guess {}/{}",
                game.guesses().len() + 1,
                game.max_guesses()
            ))?
            else {
                return Ok(());
            };

            match input.to_lowercase().as_str() {
                "quit" | "q" | "exit" => {
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
                "new" | "n" => {
                    println!(
                        "\nThe word was {}.",
                        game.solution().text().to_uppercase().bright_yellow().bold()
                    );
                    break;
                }
                word => match game.submit_guess(word) {
                    Ok(result) => {
                        print_board(&game);
                        print_keyboard(&game);
                        print_guess_result(word, &result, &game);
                    }
                    Err(e) => println!("❌ {e}\n"),
                },
            }
        }

        if game.status().is_terminal() {
            celebrate(&game);
        }

        match get_user_input("Play again? (yes/no)")?
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "yes" | "y" => println!("\n🔄 New game started!\n"),
            _ => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
        }
    }
}

fn new_game(source: &dyn SolutionSource, max_guesses: usize) -> Result<GameSession> {
    let today = Zoned::now().date();
    let daily = source
        .solution_for(today)
        .context("no solution available")?;
    tracing::debug!(date = %daily.display_date, "local game started");
    Ok(GameSession::with_max_guesses(&daily.solution, max_guesses)?)
}

fn celebrate(game: &GameSession) {
    println!("\n{}", "═".repeat(70).bright_cyan());
    if game.status() == GameStatus::Won {
        let performance = match game.guesses().len() {
            1 => "🏆 Perfect! Hole in one!",
            2 => "⭐ Excellent!",
            3 => "💫 Great!",
            4 => "✨ Good!",
            _ => "😅 Phew!",
        };
        println!("  {}", performance.bright_yellow().bold());
    } else {
        println!(
            "  The word was {}",
            game.solution().text().to_uppercase().bright_yellow().bold()
        );
    }
    println!();
    for line in share_text(game, "Wordle").lines() {
        println!("  {line}");
    }
    println!("{}", "═".repeat(70).bright_cyan());
}

/// Get user input with a prompt; `None` on end of input
fn get_user_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}
