use std::io::{self, BufRead, Write};
use tracing::warn;

/// Yes/no confirmation asked before bulk mutations.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Asks on stdout and reads the answer from stdin. Anything but yes declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        let stdin = io::stdin();
        match ask(message, &mut stdin.lock(), &mut io::stdout()) {
            Ok(answer) => answer,
            Err(err) => {
                warn!("Failed to read confirmation: {err}");
                false
            }
        }
    }
}

/// Confirms everything, for `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

pub fn ask<R: BufRead, W: Write>(message: &str, input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "{message} (y/N) ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
