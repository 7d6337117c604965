//! The triage decision procedure for one ticket.
//!
//! Given a ticket and the current rule store, [`TriageEngine::triage`]
//! decides whether to transition the ticket now, learn from an operator
//! answer, flag it for manual review, or leave it alone. The gateway and
//! the prompter are ports, so the whole procedure runs against in-memory
//! doubles in tests.
//!
//! The five cases, in priority order:
//!
//! 1. No rule for (project, type) — look up transitions and learn.
//! 2. Rule exists but its closed status is unknown — same as 1, overwrite.
//! 3. Ticket already sits in the learned closed status — nothing to do.
//! 4. Closed status known but no transition id — look up again, upgrade
//!    the rule if a transition is available now.
//! 5. Transition id known — reuse it if the tracker still offers it;
//!    otherwise report and leave the rule untouched. A stale rule is
//!    never silently relearned.

use std::fmt;

use crate::prompt::Prompter;
use crate::rules::{Rule, RuleStore};
use crate::tracker::{IssueGateway, Ticket, TrackerError, Transition};

/// What triage decided for one ticket. `Display` renders the report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageAction {
    /// The ticket already sits in the learned closed status, or the
    /// operator just confirmed its current status counts as closed.
    AlreadyClosed,
    /// A transition was executed.
    Transitioned { to: String },
    /// A rule was recorded but its closed status is still unknown.
    NeedsReview,
    /// No transition from the current status reaches the closed status.
    CannotClose { status: String },
    /// The tracker offered no transitions at all for a ticket with a
    /// learned transition id.
    NoTransitionAvailable,
    /// Dry run: the stored transition would have been applied.
    WouldTransition { to: String },
    /// Dry run: learning would be needed, which a dry run never does.
    NeedsRule,
}

impl fmt::Display for TriageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriageAction::AlreadyClosed => write!(f, "already CLOSED/DONE"),
            TriageAction::Transitioned { to } => write!(f, "transitioned to '{to}'"),
            TriageAction::NeedsReview => {
                write!(f, "not in the correct status, please check")
            }
            TriageAction::CannotClose { status } => {
                write!(f, "cannot be closed from status '{status}'")
            }
            TriageAction::NoTransitionAvailable => {
                write!(f, "no transition available, please check")
            }
            TriageAction::WouldTransition { to } => {
                write!(f, "would transition to '{to}' (dry run)")
            }
            TriageAction::NeedsRule => {
                write!(f, "no learned rule yet, run without --dry-run to teach one")
            }
        }
    }
}

/// Runs the decision procedure. In dry-run mode it never mutates the
/// tracker, never prompts and never writes to the rule store.
pub struct TriageEngine {
    pub dry_run: bool,
}

impl TriageEngine {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Decide and execute the next action for one ticket, updating the
    /// rule store in place. A gateway failure surfaces as an error; the
    /// caller reports it and moves on to the next ticket.
    pub async fn triage(
        &self,
        gateway: &impl IssueGateway,
        prompter: &mut impl Prompter,
        store: &mut RuleStore,
        ticket: &Ticket,
    ) -> Result<TriageAction, TrackerError> {
        let rule = store.get(&ticket.project, &ticket.issue_type).cloned();
        let closed_status = rule.as_ref().and_then(|r| r.closed_status.clone());

        match (rule, closed_status) {
            // Cases 1 and 2: nothing learned yet, or the closed status is
            // still unresolved. Both run the same learning flow.
            (None, _) | (Some(_), None) => self.learn(gateway, prompter, store, ticket).await,

            // Case 3.
            (Some(_), Some(closed)) if ticket.status == closed => Ok(TriageAction::AlreadyClosed),

            // Cases 4 and 5.
            (Some(rule), Some(_)) => match &rule.transition_id {
                None => self.upgrade(gateway, prompter, store, ticket).await,
                Some(id) => self.apply_known(gateway, ticket, id).await,
            },
        }
    }

    /// List the available transitions and let the operator pick one.
    /// `None` when the tracker offers nothing or the operator declines.
    async fn pick_transition(
        &self,
        gateway: &impl IssueGateway,
        prompter: &mut impl Prompter,
        ticket: &Ticket,
    ) -> Result<Option<Transition>, TrackerError> {
        let transitions = gateway.list_transitions(&ticket.key).await?;
        if transitions.is_empty() {
            return Ok(None);
        }
        Ok(prompter
            .ask_transition(&ticket.key, &transitions)
            .and_then(|i| transitions.get(i).cloned()))
    }

    /// Cases 1 and 2: learn a rule for a pair with no usable one yet.
    async fn learn(
        &self,
        gateway: &impl IssueGateway,
        prompter: &mut impl Prompter,
        store: &mut RuleStore,
        ticket: &Ticket,
    ) -> Result<TriageAction, TrackerError> {
        if self.dry_run {
            return Ok(TriageAction::NeedsRule);
        }
        match self.pick_transition(gateway, prompter, ticket).await? {
            Some(transition) => {
                gateway.apply_transition(&ticket.key, &transition.id).await?;
                store.insert(
                    &ticket.project,
                    &ticket.issue_type,
                    Rule::from_transition(&transition),
                );
                Ok(TriageAction::Transitioned {
                    to: transition.to_status,
                })
            }
            None => {
                let question = format!(
                    "Is status '{}' of ticket '{}' considered as CLOSED?",
                    ticket.status, ticket.key
                );
                let answer = prompter.ask_yes_no(&question);
                store.insert(
                    &ticket.project,
                    &ticket.issue_type,
                    Rule::from_answer(&ticket.status, answer),
                );
                if answer {
                    Ok(TriageAction::AlreadyClosed)
                } else {
                    Ok(TriageAction::NeedsReview)
                }
            }
        }
    }

    /// Case 4: the closed status is known but no transition id was ever
    /// learned. Retry the lookup; a pick upgrades the rule to a complete one.
    async fn upgrade(
        &self,
        gateway: &impl IssueGateway,
        prompter: &mut impl Prompter,
        store: &mut RuleStore,
        ticket: &Ticket,
    ) -> Result<TriageAction, TrackerError> {
        if self.dry_run {
            return Ok(TriageAction::NeedsRule);
        }
        match self.pick_transition(gateway, prompter, ticket).await? {
            Some(transition) => {
                gateway.apply_transition(&ticket.key, &transition.id).await?;
                store.insert(
                    &ticket.project,
                    &ticket.issue_type,
                    Rule::from_transition(&transition),
                );
                Ok(TriageAction::Transitioned {
                    to: transition.to_status,
                })
            }
            None => Ok(TriageAction::CannotClose {
                status: ticket.status.clone(),
            }),
        }
    }

    /// Case 5: a learned transition id exists. Reuse it without prompting
    /// if the tracker still offers it; otherwise report. The rule is left
    /// untouched in the stale case.
    async fn apply_known(
        &self,
        gateway: &impl IssueGateway,
        ticket: &Ticket,
        transition_id: &str,
    ) -> Result<TriageAction, TrackerError> {
        let transitions = gateway.list_transitions(&ticket.key).await?;
        if transitions.is_empty() {
            return Ok(TriageAction::NoTransitionAvailable);
        }
        match transitions.iter().find(|t| t.id == transition_id) {
            Some(transition) => {
                if self.dry_run {
                    return Ok(TriageAction::WouldTransition {
                        to: transition.to_status.clone(),
                    });
                }
                gateway.apply_transition(&ticket.key, &transition.id).await?;
                Ok(TriageAction::Transitioned {
                    to: transition.to_status.clone(),
                })
            }
            None => Ok(TriageAction::CannotClose {
                status: ticket.status.clone(),
            }),
        }
    }
}
