//! Terminal output writer

use scanflow_core::domain::run::RunStatus;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Writes human-readable command output, colorized unless disabled.
pub struct OutputWriter {
    no_color: bool,
}

impl OutputWriter {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            format!("{color}{text}{RESET}")
        }
    }

    pub fn print(&self, message: &str) {
        println!("{message}");
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.paint(GREEN, message));
    }

    pub fn warn(&self, message: &str) {
        println!("{}", self.paint(YELLOW, message));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.paint(RED, message));
    }

    /// Status label for a run, e.g. `[SUCCESS]`.
    pub fn status_label(&self, status: RunStatus) -> String {
        let label = format!("[{status}]");
        match status {
            RunStatus::Success => self.paint(GREEN, &label),
            RunStatus::Failure => self.paint(RED, &label),
            RunStatus::Running => self.paint(CYAN, &label),
            RunStatus::Queued | RunStatus::NotStarted => label,
        }
    }
}
