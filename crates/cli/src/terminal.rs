//! Terminal implementation of the cart's prompts and notices.

use std::io::{self, BufRead, Write};

use shopfront_cart::{Interaction, Notice};

/// Prompts on stderr, reads answers from stdin, prints notices to stdout.
pub struct TerminalInteraction {
    assume_yes: bool,
}

impl TerminalInteraction {
    /// Create a terminal interaction. With `assume_yes`, every prompt is
    /// answered affirmatively without reading stdin.
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Interaction for TerminalInteraction {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        #[allow(clippy::print_stderr)]
        {
            eprint!("{message} [y/N] ");
        }
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {e}");
                false
            }
        }
    }

    fn notify(&self, notice: &Notice) {
        #[allow(clippy::print_stdout)]
        {
            println!("{notice}");
        }
    }
}

/// Whether a typed answer means yes.
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
