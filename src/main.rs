//! Wordle Thread - CLI
//!
//! Collaborative Wordle games kept per chat thread, plus local TUI and CLI
//! modes for playing alone.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use jiff::{Zoned, civil::Date};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wordle_thread::{
    commands::{ThreadContext, check_guess, run_simple, show_game, start_game, submit_guess},
    core::Word,
    game::{DEFAULT_MAX_GUESSES, SessionRegistry},
    output::{formatters::colored_guess, print_board, print_emoji_board, print_keyboard, print_status},
    store::SqliteStore,
    wordlists::{
        ANSWERS, DailyWordList, FixedSolution, RandomWordList, SolutionSource,
        loader::{load_from_file, words_from_slice},
    },
};

#[derive(Parser)]
#[command(
    name = "wordle_thread",
    about = "Collaborative Wordle games for chat threads",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// SQLite database holding thread games
    #[arg(long, global = true, env = "WORDLE_DB", default_value = "wordle.db")]
    db: PathBuf,

    /// Guess limit for new games
    #[arg(short = 'm', long, global = true, default_value_t = DEFAULT_MAX_GUESSES)]
    max_guesses: usize,

    /// Answer list file, one word per line (default: embedded answers)
    #[arg(short = 'w', long, global = true)]
    wordlist: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI game (default)
    Play {
        /// Play this word instead of a random one
        #[arg(long)]
        word: Option<String>,
    },

    /// Simple CLI game (line prompts, no TUI)
    Simple {
        /// Play this word instead of a random one
        #[arg(long)]
        word: Option<String>,
    },

    /// Score one guess against one solution
    Check {
        /// The hidden word
        solution: String,

        /// The guess to score
        guess: String,
    },

    /// Start a game in a thread
    Start {
        #[command(flatten)]
        thread: ThreadArgs,

        /// User starting the game
        #[arg(long)]
        user: String,

        /// Use this word instead of the daily one
        #[arg(long)]
        word: Option<String>,

        /// Puzzle date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<Date>,
    },

    /// Guess in a thread's game
    Guess {
        #[command(flatten)]
        thread: ThreadArgs,

        /// User making the guess
        #[arg(long)]
        user: String,

        /// The guessed word
        word: String,
    },

    /// Show a thread's game
    Show {
        #[command(flatten)]
        thread: ThreadArgs,
    },
}

#[derive(Args)]
struct ThreadArgs {
    /// Channel the thread lives in
    #[arg(long)]
    channel: String,

    /// Thread identifier (the parent message timestamp)
    #[arg(long)]
    thread: String,
}

impl ThreadArgs {
    fn context(self, user: impl Into<String>) -> ThreadContext {
        ThreadContext {
            channel: self.channel,
            thread: self.thread,
            user: user.into(),
        }
    }
}

/// Answer words from `--wordlist`, or the embedded list
fn load_answers(wordlist: Option<&Path>) -> Result<Vec<Word>> {
    let words = match wordlist {
        Some(path) => load_from_file(path)
            .with_context(|| format!("failed to read word list {}", path.display()))?,
        None => words_from_slice(ANSWERS),
    };
    if words.is_empty() {
        bail!("word list is empty");
    }
    Ok(words)
}

fn fixed_word(word: &str) -> Result<FixedSolution> {
    let word = Word::new(word).with_context(|| format!("'{word}' is not a usable solution"))?;
    Ok(FixedSolution::new(word))
}

/// Source for local games: the given word, or a random answer
fn local_source(word: Option<&str>, wordlist: Option<&Path>) -> Result<Box<dyn SolutionSource>> {
    Ok(match word {
        Some(word) => Box::new(fixed_word(word)?),
        None => Box::new(RandomWordList::new(load_answers(wordlist)?)),
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play { word: None });

    match command {
        Commands::Play { word } => {
            let source = local_source(word.as_deref(), cli.wordlist.as_deref())?;
            run_play_command(source.as_ref(), cli.max_guesses)
        }
        Commands::Simple { word } => {
            let source = local_source(word.as_deref(), cli.wordlist.as_deref())?;
            run_simple(source.as_ref(), cli.max_guesses)
        }
        Commands::Check { solution, guess } => run_check_command(&solution, &guess),
        Commands::Start {
            thread,
            user,
            word,
            date,
        } => {
            let source: Box<dyn SolutionSource> = match word {
                Some(word) => Box::new(fixed_word(&word)?),
                None => Box::new(DailyWordList::new(load_answers(cli.wordlist.as_deref())?)),
            };
            let date = date.unwrap_or_else(|| Zoned::now().date());
            let registry = open_registry(&cli.db)?;
            let game = start_game(
                &registry,
                source.as_ref(),
                date,
                &thread.context(user),
                cli.max_guesses,
            )?;

            println!(
                "Game started for {} in {}/{}. Guess with `guess`.",
                game.meta().display_date.bright_white().bold(),
                game.meta().channel,
                game.meta().thread_ts
            );
            print_emoji_board(&game);
            Ok(())
        }
        Commands::Guess { thread, user, word } => {
            let registry = open_registry(&cli.db)?;
            let context = thread.context(user);
            let outcome = submit_guess(&registry, &context, &word)?;
            let game = &outcome.session;

            if let Some(last) = game.guesses().last() {
                println!(
                    "{} guessed {}",
                    context.user,
                    colored_guess(last.word().letters(), &outcome.result)
                );
            }
            print_emoji_board(game);
            print_status(game);
            Ok(())
        }
        Commands::Show { thread } => {
            let registry = open_registry(&cli.db)?;
            let game = show_game(&registry, &thread.context(String::new()))?;

            println!(
                "Wordle {} · started by {}",
                game.meta().display_date,
                game.meta().user
            );
            print_board(&game);
            print_keyboard(&game);
            print_status(&game);
            Ok(())
        }
    }
}

fn open_registry(db: &Path) -> Result<SessionRegistry<SqliteStore>> {
    let store = SqliteStore::open(db)
        .with_context(|| format!("failed to open game database {}", db.display()))?;
    Ok(SessionRegistry::new(store))
}

fn run_check_command(solution: &str, guess: &str) -> Result<()> {
    let result = check_guess(solution, guess)?;
    println!(
        "{} {}  {}",
        colored_guess(guess.to_lowercase().as_bytes(), &result),
        result.to_emoji(),
        result
    );
    Ok(())
}

fn run_play_command(source: &dyn SolutionSource, max_guesses: usize) -> Result<()> {
    use wordle_thread::interactive::{App, run_tui};

    let app = App::new(source, max_guesses)?;
    run_tui(app)
}
