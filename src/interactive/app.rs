//! TUI application state and logic

use crate::game::{GameSession, GameStatus};
use crate::wordlists::SolutionSource;
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use jiff::Zoned;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
pub struct App<'a> {
    pub source: &'a dyn SolutionSource,
    pub max_guesses: usize,
    pub game: GameSession,
    pub display_date: String,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Guessing,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    /// Wins by number of guesses used; index 0 is unused
    pub guess_distribution: Vec<usize>,
}

impl<'a> App<'a> {
    /// Create the app with a first game from `source`
    ///
    /// # Errors
    ///
    /// Returns an error if the source has no usable solution.
    pub fn new(source: &'a dyn SolutionSource, max_guesses: usize) -> Result<Self> {
        let (game, display_date) = fresh_game(source, max_guesses)?;

        Ok(Self {
            source,
            max_guesses,
            game,
            display_date,
            input_buffer: String::new(),
            messages: vec![
                Message {
                    text: format!("Guess the word in {max_guesses} tries."),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "Type letters, Enter to submit, Esc to quit".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            stats: Statistics {
                guess_distribution: vec![0; max_guesses.saturating_add(1)],
                ..Statistics::default()
            },
            should_quit: false,
            input_mode: InputMode::Guessing,
        })
    }

    /// Type a letter into the pending guess
    pub fn push_letter(&mut self, c: char) {
        if c.is_ascii_alphabetic() && self.input_buffer.len() < self.game.word_length() {
            self.input_buffer.push(c.to_ascii_lowercase());
        }
    }

    /// Submit the pending guess
    pub fn handle_guess(&mut self) {
        let guess = std::mem::take(&mut self.input_buffer);

        match self.game.submit_guess(&guess) {
            Ok(result) => {
                let status = self.game.status();
                match status {
                    GameStatus::Active => {
                        let left = self.game.remaining_guesses();
                        self.add_message(
                            &format!("{} {} · {left} left", guess.to_uppercase(), result.to_emoji()),
                            MessageStyle::Info,
                        );
                    }
                    GameStatus::Won => {
                        let used = self.game.guesses().len();
                        self.finish_game(true);
                        let celebration = match used {
                            1 => "🎯 HOLE IN ONE! 🌟",
                            2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
                            3 => "✨ SPLENDID! Three guesses! ✨",
                            4 => "👏 GREAT JOB! Four guesses! 👏",
                            _ => "😅 PHEW! Got it! 😅",
                        };
                        self.add_message(celebration, MessageStyle::Success);
                        self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
                    }
                    GameStatus::Exhausted => {
                        self.finish_game(false);
                        self.add_message(
                            &format!(
                                "Out of guesses! The word was {}",
                                self.game.solution().text().to_uppercase()
                            ),
                            MessageStyle::Error,
                        );
                        self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
                    }
                }
            }
            Err(e) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                // Give the letters back so the player can fix the guess
                self.input_buffer = guess;
            }
        }
    }

    fn finish_game(&mut self, won: bool) {
        self.stats.total_games += 1;
        if won {
            self.stats.games_won += 1;
            let used = self.game.guesses().len();
            if let Some(slot) = self.stats.guess_distribution.get_mut(used) {
                *slot += 1;
            }
        }
        self.input_mode = InputMode::GameOver;
    }

    /// Start over with a new word
    ///
    /// # Errors
    ///
    /// Returns an error if the source has no usable solution.
    pub fn new_game(&mut self) -> Result<()> {
        let (game, display_date) = fresh_game(self.source, self.max_guesses)?;
        self.game = game;
        self.display_date = display_date;
        self.input_buffer.clear();
        self.messages.clear();
        self.input_mode = InputMode::Guessing;
        self.add_message("New game started!", MessageStyle::Info);
        Ok(())
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.stats.total_games == 0 {
            return 0.0;
        }
        self.stats.games_won as f64 / self.stats.total_games as f64 * 100.0
    }
}

fn fresh_game(source: &dyn SolutionSource, max_guesses: usize) -> Result<(GameSession, String)> {
    let daily = source
        .solution_for(Zoned::now().date())
        .context("no solution available")?;
    let game = GameSession::with_max_guesses(&daily.solution, max_guesses)?;
    Ok((game, daily.display_date))
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                app.should_quit = true;
            } else {
                match app.input_mode {
                    InputMode::GameOver => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                        KeyCode::Char('n') => app.new_game()?,
                        _ => {}
                    },
                    InputMode::Guessing => match key.code {
                        KeyCode::Esc => app.should_quit = true,
                        KeyCode::Char(c) => app.push_letter(c),
                        KeyCode::Backspace => {
                            app.input_buffer.pop();
                        }
                        KeyCode::Enter => app.handle_guess(),
                        _ => {}
                    },
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::wordlists::FixedSolution;

    fn earth() -> FixedSolution {
        FixedSolution::new(Word::new("earth").unwrap())
    }

    fn type_guess(app: &mut App, word: &str) {
        for c in word.chars() {
            app.push_letter(c);
        }
        app.handle_guess();
    }

    #[test]
    fn typing_is_capped_and_lowercased() {
        let source = earth();
        let mut app = App::new(&source, 5).unwrap();
        for c in "EARTHQUAKE1".chars() {
            app.push_letter(c);
        }
        assert_eq!(app.input_buffer, "earth");
    }

    #[test]
    fn short_guess_keeps_buffer() {
        let source = earth();
        let mut app = App::new(&source, 5).unwrap();
        type_guess(&mut app, "ear");
        assert_eq!(app.input_buffer, "ear");
        assert!(app.game.guesses().is_empty());
        assert!(matches!(
            app.messages.last().map(|m| &m.style),
            Some(MessageStyle::Error)
        ));
    }

    #[test]
    fn winning_updates_stats() {
        let source = earth();
        let mut app = App::new(&source, 5).unwrap();
        type_guess(&mut app, "arise");
        type_guess(&mut app, "earth");

        assert_eq!(app.input_mode, InputMode::GameOver);
        assert_eq!(app.stats.total_games, 1);
        assert_eq!(app.stats.games_won, 1);
        assert_eq!(app.stats.guess_distribution[2], 1);
        assert!((app.win_rate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn losing_then_new_game() {
        let source = earth();
        let mut app = App::new(&source, 2).unwrap();
        type_guess(&mut app, "arise");
        type_guess(&mut app, "heart");

        assert_eq!(app.input_mode, InputMode::GameOver);
        assert_eq!(app.stats.games_won, 0);

        app.new_game().unwrap();
        assert_eq!(app.input_mode, InputMode::Guessing);
        assert!(app.game.guesses().is_empty());
        assert_eq!(app.stats.total_games, 1);
    }
}
