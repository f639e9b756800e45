//! Interactive confirmation on the controlling terminal

use std::io::{self, BufRead, IsTerminal, Write};

use ossctl_core::{is_affirmative, Confirm};

/// Asks on stderr and reads one line from stdin
///
/// Without a terminal on stdin nobody can answer, so the question is declined.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleConfirm;

impl Confirm for ConsoleConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        // Reading the answer blocks, so keep it off the async worker
        tokio::task::block_in_place(|| ask(prompt))
    }
}

fn ask(prompt: &str) -> bool {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        tracing::warn!(prompt, "stdin is not a terminal, answering no");
        return false;
    }

    let mut stderr = io::stderr();
    if write!(stderr, "{prompt}").and_then(|_| stderr.flush()).is_err() {
        return false;
    }

    let mut answer = String::new();
    match stdin.lock().read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(e) => {
            tracing::debug!(error = %e, "failed to read confirmation");
            false
        }
    }
}
