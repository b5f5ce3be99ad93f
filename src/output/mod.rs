//! Terminal output formatting
//!
//! Renders boards, keyboards and status lines. Nothing here touches game
//! state; it only reads what a session exposes.

pub mod display;
pub mod formatters;

pub use display::{print_board, print_emoji_board, print_guess_result, print_keyboard, print_status};
