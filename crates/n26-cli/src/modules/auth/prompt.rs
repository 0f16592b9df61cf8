use std::io::{self, Write};

/// Source of interactive input: login details, confirmations and PINs.
pub trait Prompter: Send + Sync {
    fn read_line(&self, prompt: &str) -> io::Result<String>;

    /// Reads without echoing. The terminal mode is restored on every path.
    fn read_secret(&self, prompt: &str) -> io::Result<String>;
}

pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn read_line(&self, prompt: &str) -> io::Result<String> {
        let mut input = String::new();
        print!("{prompt}");
        io::stdout().flush()?;
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    fn read_secret(&self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let secret = rpassword::read_password();
        println!();
        secret
    }
}

#[cfg(test)]
pub(crate) use scripted::ScriptedPrompter;
