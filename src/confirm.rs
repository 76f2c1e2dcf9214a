use std::io::{self, BufRead, Write};

/// Decides whether the pipeline may go ahead with a download.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Unattended mode: always yes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Asks on a console and blocks for a `Y`/`N` answer.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        ConsolePrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePrompt { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for ConsolePrompt<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{} (Y/N): ", prompt)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => false,
            Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
            Err(err) => {
                log::warn!("Could not read confirmation: {}", err);
                false
            }
        }
    }
}
