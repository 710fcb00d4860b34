use std::io::{self, BufRead, Write};

use log::debug;

/// A trait, necessary for every entity that gates destructive operations.
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Allows plain closures to answer prompts.
impl<F> Confirmer for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Asks on stdout and reads a y/N answer from stdin.
#[derive(Debug, Default)]
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        let accepted = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
        debug!("Prompt {:?} answered {}", prompt, accepted);
        accepted
    }
}

/// Answers every prompt the same way, for `--yes` and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}
