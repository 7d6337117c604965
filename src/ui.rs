//! Terminal output — spinner and colored report.
//!
//! Uses `indicatif` for the search spinner and `console` for styling.
//! Green for tickets that ended up closed, yellow for ones needing a
//! human, red for failures.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::runner::TicketReport;
use crate::triage::TriageAction;

/// Spinner shown while the tracker query runs.
pub fn search_spinner(jql: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("invalid template"),
    );
    pb.set_message(format!("querying tracker: {jql}"));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Renders the per-ticket report and the end-of-run summary.
pub struct Reporter {
    green: Style,
    red: Style,
    yellow: Style,
    dim: Style,
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
            verbose,
        }
    }

    /// One line per ticket, colored by outcome.
    pub fn print_reports(&self, reports: &[TicketReport]) {
        for report in reports {
            match &report.outcome {
                Ok(action) => {
                    let mark = match action {
                        TriageAction::AlreadyClosed | TriageAction::Transitioned { .. } => {
                            self.green.apply_to("✓")
                        }
                        TriageAction::WouldTransition { .. } => self.dim.apply_to("·"),
                        _ => self.yellow.apply_to("!"),
                    };
                    println!("{mark} {}: {action}", report.key);
                }
                Err(e) => {
                    println!("{} {}: {e}", self.red.apply_to("✗"), report.key);
                }
            }
        }
    }

    /// Summary counts after the batch.
    pub fn print_summary(&self, reports: &[TicketReport]) {
        let failed = reports.iter().filter(|r| r.is_failure()).count();
        let attention = reports
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    Ok(TriageAction::NeedsReview)
                        | Ok(TriageAction::CannotClose { .. })
                        | Ok(TriageAction::NoTransitionAvailable)
                        | Ok(TriageAction::NeedsRule)
                )
            })
            .count();

        println!();
        println!(
            "{} ticket(s) processed, {} needing attention, {} failed",
            reports.len(),
            attention,
            failed
        );
        if self.verbose && failed > 0 {
            println!(
                "{}",
                self.dim
                    .apply_to("failed tickets were skipped; rerun to retry them")
            );
        }
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{} {message}", self.yellow.apply_to("warning:"));
    }
}
