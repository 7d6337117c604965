//! Operator prompt port.
//!
//! The triage engine never reads stdin itself; it asks questions through
//! the [`Prompter`] trait so tests can script the answers. The console
//! implementation mirrors the interactive flow operators already know:
//! re-ask until the answer is valid, `0` to decline a transition list.
//! End of input counts as declining, so a non-interactive invocation
//! (stdin closed or redirected from /dev/null) terminates instead of
//! re-asking forever.

use std::io::{BufRead, BufReader, Write};

use console::Style;

use crate::tracker::Transition;

/// Blocking questions the engine may ask while learning a rule.
pub trait Prompter {
    /// Yes/no question, e.g. "is status 'Resolved' of ticket 'OP-1'
    /// considered as CLOSED?".
    fn ask_yes_no(&mut self, question: &str) -> bool;

    /// Pick one transition from the offered list, or `None` to decline
    /// them all.
    fn ask_transition(&mut self, ticket_key: &str, options: &[Transition]) -> Option<usize>;
}

/// Interactive prompter reading answers from an input stream, stdin by
/// default.
pub struct ConsolePrompter {
    input: Box<dyn BufRead>,
    bold: Style,
    dim: Style,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self::with_input(Box::new(BufReader::new(std::io::stdin())))
    }

    /// Create a prompter over an arbitrary input stream (used by tests).
    pub fn with_input(input: Box<dyn BufRead>) -> Self {
        Self {
            input,
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Read one answer line. `None` means the input is exhausted (EOF)
    /// or unreadable; callers treat that as a decline.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ConsolePrompter {
    fn ask_yes_no(&mut self, question: &str) -> bool {
        loop {
            println!("{} (Yes/No)", self.bold.apply_to(question));
            let _ = std::io::stdout().flush();
            let Some(answer) = self.read_line() else {
                return false;
            };
            match answer.to_lowercase().as_str() {
                "yes" | "y" => return true,
                "no" | "n" => return false,
                _ => println!("{}", self.dim.apply_to("Please answer Yes or No.")),
            }
        }
    }

    fn ask_transition(&mut self, ticket_key: &str, options: &[Transition]) -> Option<usize> {
        println!(
            "Available transitions for ticket '{}':",
            self.bold.apply_to(ticket_key)
        );
        for (i, transition) in options.iter().enumerate() {
            println!(
                "{}. '{}' to status '{}'",
                i + 1,
                transition.name,
                transition.to_status
            );
        }
        loop {
            println!(
                "Choose the transition that moves the ticket to its CLOSED/DONE \
                 status (0 if none of the above):"
            );
            let _ = std::io::stdout().flush();
            let answer = self.read_line()?;
            match answer.parse::<usize>() {
                Ok(0) => return None,
                Ok(n) if n <= options.len() => return Some(n - 1),
                _ => println!(
                    "{}",
                    self.dim
                        .apply_to(format!("Please enter a number between 0 and {}.", options.len()))
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter_with(input: &str) -> ConsolePrompter {
        ConsolePrompter::with_input(Box::new(Cursor::new(input.to_string())))
    }

    fn close_transition() -> Transition {
        Transition {
            id: "7".into(),
            name: "Close Issue".into(),
            to_status: "Done".into(),
        }
    }

    #[test]
    fn yes_no_accepts_yes_and_no() {
        assert!(prompter_with("yes\n").ask_yes_no("closed?"));
        assert!(prompter_with("Y\n").ask_yes_no("closed?"));
        assert!(!prompter_with("no\n").ask_yes_no("closed?"));
    }

    #[test]
    fn yes_no_reasks_until_valid() {
        assert!(prompter_with("maybe\n\nyes\n").ask_yes_no("closed?"));
    }

    #[test]
    fn yes_no_returns_false_on_exhausted_input() {
        // Closed stdin must terminate as a decline, not re-ask forever.
        assert!(!prompter_with("").ask_yes_no("closed?"));
        assert!(!prompter_with("maybe\n").ask_yes_no("closed?"));
    }

    #[test]
    fn transition_choice_is_one_based() {
        let options = vec![close_transition(), close_transition()];
        assert_eq!(prompter_with("2\n").ask_transition("OP-1", &options), Some(1));
        assert_eq!(prompter_with("1\n").ask_transition("OP-1", &options), Some(0));
    }

    #[test]
    fn transition_zero_declines() {
        let options = vec![close_transition()];
        assert_eq!(prompter_with("0\n").ask_transition("OP-1", &options), None);
    }

    #[test]
    fn transition_reasks_on_out_of_range_answer() {
        let options = vec![close_transition()];
        assert_eq!(
            prompter_with("5\nnope\n1\n").ask_transition("OP-1", &options),
            Some(0)
        );
    }

    #[test]
    fn transition_declines_on_exhausted_input() {
        let options = vec![close_transition()];
        assert_eq!(prompter_with("").ask_transition("OP-1", &options), None);
        assert_eq!(prompter_with("99\n").ask_transition("OP-1", &options), None);
    }
}
