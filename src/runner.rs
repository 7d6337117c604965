//! Batch run over one release's tickets.
//!
//! [`run`] performs the full sequence: query the tracker with the JQL
//! filter, triage every ticket strictly in order, and return a per-ticket
//! report list. The query failing is fatal; a single ticket failing is
//! just a report line, the batch keeps going.

use crate::prompt::Prompter;
use crate::rules::RuleStore;
use crate::tracker::{IssueGateway, TrackerError};
use crate::triage::{TriageAction, TriageEngine};
use crate::ui;

/// Outcome of triaging one ticket, kept alongside its key for the report.
#[derive(Debug)]
pub struct TicketReport {
    pub key: String,
    pub outcome: Result<TriageAction, TrackerError>,
}

impl TicketReport {
    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Run the whole batch for one JQL filter, updating the rule store in
/// place. The store is NOT persisted here; the caller flushes it once at
/// the end of the process, whatever happened in between.
pub async fn run(
    gateway: &impl IssueGateway,
    prompter: &mut impl Prompter,
    store: &mut RuleStore,
    jql: &str,
    dry_run: bool,
) -> Result<Vec<TicketReport>, TrackerError> {
    let spinner = ui::search_spinner(jql);
    let result = gateway.search_issues(jql).await;
    spinner.finish_and_clear();
    let tickets = result?;

    let engine = TriageEngine::new(dry_run);
    let mut reports = Vec::with_capacity(tickets.len());
    for ticket in &tickets {
        let outcome = engine.triage(gateway, prompter, store, ticket).await;
        reports.push(TicketReport {
            key: ticket.key.clone(),
            outcome,
        });
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::rules::Rule;
    use crate::tracker::{Ticket, Transition};

    /// Gateway double serving a fixed ticket list and per-ticket
    /// transition lists; listed keys in `broken` fail on lookup.
    struct FixtureGateway {
        tickets: Vec<Ticket>,
        transitions: HashMap<String, Vec<Transition>>,
        broken: Vec<String>,
        applied: RefCell<Vec<(String, String)>>,
    }

    impl IssueGateway for FixtureGateway {
        async fn search_issues(&self, _jql: &str) -> Result<Vec<Ticket>, TrackerError> {
            Ok(self.tickets.clone())
        }

        async fn list_transitions(&self, key: &str) -> Result<Vec<Transition>, TrackerError> {
            if self.broken.iter().any(|k| k == key) {
                return Err(TrackerError::Malformed("missing field `transitions`".into()));
            }
            Ok(self.transitions.get(key).cloned().unwrap_or_default())
        }

        async fn apply_transition(
            &self,
            key: &str,
            transition_id: &str,
        ) -> Result<(), TrackerError> {
            self.applied
                .borrow_mut()
                .push((key.to_string(), transition_id.to_string()));
            Ok(())
        }
    }

    struct NoPrompts;

    impl Prompter for NoPrompts {
        fn ask_yes_no(&mut self, _question: &str) -> bool {
            panic!("unexpected prompt");
        }

        fn ask_transition(&mut self, _key: &str, _options: &[Transition]) -> Option<usize> {
            panic!("unexpected prompt");
        }
    }

    fn ticket(key: &str, status: &str) -> Ticket {
        Ticket {
            key: key.into(),
            project: "OP".into(),
            issue_type: "Bug".into(),
            status: status.into(),
        }
    }

    fn done_rule() -> Rule {
        Rule {
            closed_status: Some("Done".into()),
            to_status: Some("Done".into()),
            transition_id: Some("7".into()),
        }
    }

    fn close_transition() -> Transition {
        Transition {
            id: "7".into(),
            name: "Close Issue".into(),
            to_status: "Done".into(),
        }
    }

    #[tokio::test]
    async fn one_broken_ticket_does_not_abort_the_batch() {
        let gateway = FixtureGateway {
            tickets: vec![
                ticket("OP-1", "In Progress"),
                ticket("OP-2", "In Progress"),
                ticket("OP-3", "Done"),
            ],
            transitions: HashMap::from([("OP-2".to_string(), vec![close_transition()])]),
            broken: vec!["OP-1".into()],
            applied: RefCell::new(Vec::new()),
        };
        let mut store = RuleStore::default();
        store.insert("OP", "Bug", done_rule());

        let reports = run(&gateway, &mut NoPrompts, &mut store, "x = 1", false)
            .await
            .unwrap();

        assert_eq!(reports.len(), 3);
        assert!(reports[0].is_failure());
        assert_eq!(
            reports[1].outcome.as_ref().unwrap(),
            &TriageAction::Transitioned { to: "Done".into() }
        );
        assert_eq!(
            reports[2].outcome.as_ref().unwrap(),
            &TriageAction::AlreadyClosed
        );
        assert_eq!(*gateway.applied.borrow(), vec![("OP-2".into(), "7".into())]);
    }

    #[tokio::test]
    async fn search_failure_is_fatal() {
        struct BrokenSearch;

        impl IssueGateway for BrokenSearch {
            async fn search_issues(&self, _jql: &str) -> Result<Vec<Ticket>, TrackerError> {
                Err(TrackerError::Api {
                    status: 500,
                    message: "boom".into(),
                })
            }

            async fn list_transitions(&self, _key: &str) -> Result<Vec<Transition>, TrackerError> {
                unreachable!()
            }

            async fn apply_transition(&self, _k: &str, _id: &str) -> Result<(), TrackerError> {
                unreachable!()
            }
        }

        let mut store = RuleStore::default();
        let err = run(&BrokenSearch, &mut NoPrompts, &mut store, "x = 1", false)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn empty_search_yields_empty_report() {
        let gateway = FixtureGateway {
            tickets: vec![],
            transitions: HashMap::new(),
            broken: vec![],
            applied: RefCell::new(Vec::new()),
        };
        let mut store = RuleStore::default();

        let reports = run(&gateway, &mut NoPrompts, &mut store, "x = 1", false)
            .await
            .unwrap();
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn learned_rule_is_reused_across_the_batch() {
        // Both tickets share (OP, Bug); the first one teaches the rule,
        // the second one reuses it without prompting.
        struct PickFirst {
            asked: u32,
        }

        impl Prompter for PickFirst {
            fn ask_yes_no(&mut self, _q: &str) -> bool {
                panic!("unexpected yes/no prompt");
            }

            fn ask_transition(&mut self, _k: &str, _o: &[Transition]) -> Option<usize> {
                self.asked += 1;
                Some(0)
            }
        }

        let gateway = FixtureGateway {
            tickets: vec![ticket("OP-1", "In Progress"), ticket("OP-2", "In Review")],
            transitions: HashMap::from([
                ("OP-1".to_string(), vec![close_transition()]),
                ("OP-2".to_string(), vec![close_transition()]),
            ]),
            broken: vec![],
            applied: RefCell::new(Vec::new()),
        };
        let mut store = RuleStore::default();
        let mut prompter = PickFirst { asked: 0 };

        let reports = run(&gateway, &mut prompter, &mut store, "x = 1", false)
            .await
            .unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| !r.is_failure()));
        assert_eq!(prompter.asked, 1);
        assert_eq!(gateway.applied.borrow().len(), 2);
        assert_eq!(store.len(), 1);
    }
}
