//! Colored terminal output utilities.
//!
//! Status messages go to stderr so command results on stdout stay pipeable.

use std::io::Write;

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a secondary message (dimmed).
    pub(crate) fn muted(&self, msg: &str) {
        let _ = self.term.write_line(&self.dim.apply_to(msg).to_string());
    }
}

/// Write a command result to stdout.
pub(crate) fn write_stdout(content: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}
