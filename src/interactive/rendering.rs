//! TUI rendering with ratatui
//!
//! Board, keyboard and messages for the local game.

use super::app::{App, InputMode, MessageStyle};
use crate::core::LetterVerdict;
use crate::game::GameStatus;
use crate::output::formatters::{KEYBOARD_ROWS, share_text, status_line};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Board
            Constraint::Percentage(50), // Keyboard and messages
        ])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!("🟩 WORDLE · {}", app.display_date))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

const fn verdict_style(verdict: LetterVerdict) -> Style {
    let (fg, bg) = match verdict {
        LetterVerdict::Exact => (Color::Black, Color::Green),
        LetterVerdict::Present => (Color::Black, Color::Yellow),
        LetterVerdict::Absent => (Color::White, Color::DarkGray),
    };
    Style::new().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

fn tile(letter: char, style: Style) -> Span<'static> {
    Span::styled(format!(" {} ", letter.to_ascii_uppercase()), style)
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let game = &app.game;
    let empty = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line> = Vec::with_capacity(game.max_guesses().saturating_mul(2));

    for guess in game.guesses() {
        let spans: Vec<Span> = guess
            .word()
            .letters()
            .iter()
            .zip(guess.result().verdicts())
            .flat_map(|(&letter, &verdict)| {
                [tile(char::from(letter), verdict_style(verdict)), Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    // The row being typed, then blank rows
    let mut rows_left = game.max_guesses().saturating_sub(game.guesses().len());
    if app.input_mode == InputMode::Guessing && rows_left > 0 {
        let typed = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let mut letters = app.input_buffer.chars();
        let spans: Vec<Span> = (0..game.word_length())
            .flat_map(|_| {
                let cell = match letters.next() {
                    Some(c) => tile(c, typed),
                    None => Span::styled(" _ ", empty),
                };
                [cell, Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::default());
        rows_left -= 1;
    }
    for _ in 0..rows_left {
        lines.push(Line::from(Span::styled(
            " · ".repeat(game.word_length()),
            empty,
        )));
        lines.push(Line::default());
    }

    let board = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!(" Board · {} ", status_line(game)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(board, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Keyboard
            Constraint::Min(5),    // Messages or share text
        ])
        .split(area);

    render_keyboard(f, app, chunks[0]);
    if app.game.status().is_terminal() {
        render_share(f, app, chunks[1]);
    } else {
        render_messages(f, app, chunks[1]);
    }
}

fn render_keyboard(f: &mut Frame, app: &App, area: Rect) {
    let hints = app.game.letter_hints();
    let untried = Style::default().fg(Color::White);

    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .map(|c| {
                    let style = hints.get(&c).map_or(untried, |&v| verdict_style(v));
                    tile(c, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Keyboard ").borders(Borders::ALL));
    f.render_widget(keyboard, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_share(f: &mut Frame, app: &App, area: Rect) {
    let color = if app.game.status() == GameStatus::Won {
        Color::Green
    } else {
        Color::Red
    };

    let mut lines: Vec<Line> = app
        .messages
        .iter()
        .rev()
        .take(2)
        .map(|msg| Line::from(msg.text.clone()))
        .collect();
    lines.push(Line::default());
    lines.extend(
        share_text(&app.game, &format!("Wordle {}", app.display_date))
            .lines()
            .map(|l| Line::from(l.to_string())),
    );

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Result ")
                .borders(Borders::ALL)
                .style(Style::default().fg(color)),
        );
    f.render_widget(paragraph, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::GameOver => (
            " Game over | Press 'n' for new game or 'q' to quit ".to_string(),
            "",
            Color::Green,
        ),
        InputMode::Guessing => (
            format!(
                " Guess {}/{} | Enter to submit, Backspace to erase ",
                app.game.guesses().len() + 1,
                app.game.max_guesses()
            ),
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
    };

    let input = Paragraph::new(content.to_uppercase())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        app.win_rate()
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[0]);

    let distribution: String = app
        .stats
        .guess_distribution
        .iter()
        .enumerate()
        .skip(1)
        .map(|(n, wins)| format!("{n}:{wins} "))
        .collect();
    let dist = Paragraph::new(distribution.trim_end().to_string()).alignment(Alignment::Center);
    f.render_widget(dist, chunks[1]);

    let help_text = match app.input_mode {
        InputMode::Guessing => "Esc: Quit | Enter: Submit",
        InputMode::GameOver => "q: Quit | n: New Game",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
