//! Terminal front end: views render query results, actions run mutations
//! and refresh what they affect.

pub mod actions;
pub mod views;

pub use actions::{Board, Outcome};
pub use views::QueryState;

use std::io::{self, BufRead, Write};

/// Where the board writes and asks.
pub trait Console {
    /// Render a view.
    fn show(&mut self, text: &str);
    /// Blocking notification.
    fn alert(&mut self, msg: &str);
    /// Yes/no question; `false` cancels the action.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Console over stdin/stdout.
pub struct StdConsole {
    assume_yes: bool,
}

impl StdConsole {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Console for StdConsole {
    fn show(&mut self, text: &str) {
        println!("{}", text.trim_end());
    }

    fn alert(&mut self, msg: &str) {
        println!("[!] {msg}");
    }

    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{question} [y/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
