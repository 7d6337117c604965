//! Data types for the issue tracker REST API.
//!
//! The wire structs mirror the tracker's JSON shapes (nested `fields`,
//! `to.name`) and derive `Deserialize`; [`Ticket`] and [`Transition`] are
//! the flattened domain records the rest of the crate works with. Fields
//! are required — a payload missing one of them fails deserialization and
//! surfaces as a malformed-response error rather than an empty string.

use serde::{Deserialize, Serialize};

/// One ticket as seen by the triage engine.
///
/// Fetched fresh on every run and never persisted; the learned state lives
/// in the rule store keyed by `(project, issue_type)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Issue key, e.g. "OP-123".
    pub key: String,
    /// Project key, e.g. "OP".
    pub project: String,
    /// Issue type name, e.g. "Bug" or "Story".
    pub issue_type: String,
    /// Current workflow status name, e.g. "In Progress".
    pub status: String,
}

/// A workflow transition the tracker currently offers for a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Opaque transition id; trackers serve these as strings.
    pub id: String,
    /// Human-readable transition name, e.g. "Close Issue".
    pub name: String,
    /// Name of the status the transition leads to.
    pub to_status: String,
}

/// Response body of the issue search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub issues: Vec<Issue>,
}

/// One issue in a search response, still in wire shape.
#[derive(Debug, Deserialize)]
pub struct Issue {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub struct IssueFields {
    pub project: ProjectRef,
    pub issuetype: NamedRef,
    pub status: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct ProjectRef {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

/// Response body of the transitions listing endpoint.
#[derive(Debug, Deserialize)]
pub struct TransitionsResponse {
    pub transitions: Vec<WireTransition>,
}

#[derive(Debug, Deserialize)]
pub struct WireTransition {
    pub id: String,
    pub name: String,
    pub to: NamedRef,
}

impl From<Issue> for Ticket {
    fn from(issue: Issue) -> Self {
        Self {
            key: issue.key,
            project: issue.fields.project.key,
            issue_type: issue.fields.issuetype.name,
            status: issue.fields.status.name,
        }
    }
}

impl From<WireTransition> for Transition {
    fn from(wire: WireTransition) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            to_status: wire.to.name,
        }
    }
}
