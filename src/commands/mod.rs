//! Command implementations

pub mod check;
pub mod simple;
pub mod thread;

pub use check::check_guess;
pub use simple::run_simple;
pub use thread::{ThreadContext, ThreadError, show_game, start_game, submit_guess};
