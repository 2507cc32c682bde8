//! Terminal output: human-readable styling or machine-readable JSON.

use console::{Style, Term, style};
use serde::Serialize;
use std::io::Write;

/// How command output is rendered.
#[derive(Debug, Clone)]
pub struct OutputContext {
    json: bool,
    theme: Theme,
}

impl OutputContext {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            theme: Theme::standard(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Print `value` as one line of JSON on stdout.
    pub fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let line = serde_json::to_string(value)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }

    /// Whether stdout is an interactive terminal.
    pub fn is_tty(&self) -> bool {
        Term::stdout().is_term()
    }
}

/// Styles for the human-readable output.
#[derive(Debug, Clone)]
pub struct Theme {
    header: Style,
    highlight: Style,
    muted: Style,
    success: Style,
    warning: Style,
    error: Style,
}

impl Theme {
    fn standard() -> Self {
        Self {
            header: Style::new().bold().underlined(),
            highlight: Style::new().cyan(),
            muted: Style::new().dim(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
        }
    }

    pub fn format_header(&self, text: &str) -> String {
        self.header.apply_to(text).to_string()
    }

    pub fn highlight(&self, text: &str) -> String {
        self.highlight.apply_to(text).to_string()
    }

    pub fn muted(&self, text: &str) -> String {
        self.muted.apply_to(text).to_string()
    }
}

/// Leading status marker for one-line results.
#[derive(Debug, Clone, Copy)]
pub enum StatusIndicator {
    Success,
    Warning,
    Error,
}

impl StatusIndicator {
    pub fn display(self, theme: &Theme) -> String {
        match self {
            Self::Success => theme.success.apply_to("✓").to_string(),
            Self::Warning => theme.warning.apply_to("!").to_string(),
            Self::Error => theme.error.apply_to("✗").to_string(),
        }
    }
}

/// Print a single error line to stderr, styled when stderr is a terminal.
pub fn eprint_error(message: &str) {
    eprintln!("{} {}", style("error:").red().bold().for_stderr(), message);
}
