//! Terminal notice sink.
//!
//! API failures raised with `show_error` end up here: one line per notice on
//! stderr, highlighted when color is enabled.

use owo_colors::OwoColorize;

use keygo_api::Notifier;

pub struct TerminalNotifier {
    color: bool,
}

impl TerminalNotifier {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn format(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", "error:".red().bold(), message.bold())
        } else {
            format!("error: {message}")
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", self.format(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_notice_has_no_escape_codes() {
        let line = TerminalNotifier::new(false).format("Tenant name is required");
        assert_eq!(line, "error: Tenant name is required");
    }

    #[test]
    fn colored_notice_keeps_message() {
        let line = TerminalNotifier::new(true).format("not authorized");
        assert!(line.contains("not authorized"));
        assert!(line.contains('\u{1b}'));
    }
}
