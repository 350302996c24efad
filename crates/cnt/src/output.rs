//! Colored stderr messages for `cnt resolve`.

use console::{Style, Term};

/// Diagnostics printer for the CLI.
///
/// Parser warnings (unclosed or stray container fences), undefined counter
/// references and fatal errors all go to stderr, so a document resolved to
/// stdout can be piped on untouched.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Confirm that the resolved document was written to `--output` (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Report a parser warning or an undefined counter reference (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Report the error that ends the run (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
