//! Learned workflow rules, persisted between runs.
//!
//! Different teams name their Done/Closed status differently and reach it
//! through different transitions. [`RuleStore`] remembers, per project and
//! issue type, which status counts as closed and which transition gets
//! there, so the operator is only asked the first time a pair shows up.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::tracker::Transition;

/// What the tool has learned about closing one (project, issue type) pair.
///
/// All three fields are optional on disk; a rule with `closed_status`
/// unknown is incomplete and gets revisited on every ticket of its pair
/// until an operator resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Status name considered terminal for this pair, if known.
    pub closed_status: Option<String>,
    /// Status the learned transition leads to, if any.
    pub to_status: Option<String>,
    /// Transition id to invoke, if a safe one was ever found.
    pub transition_id: Option<String>,
}

impl Rule {
    /// A complete rule learned from an applied transition: the target
    /// status doubles as the closed status.
    pub fn from_transition(transition: &Transition) -> Self {
        Self {
            closed_status: Some(transition.to_status.clone()),
            to_status: Some(transition.to_status.clone()),
            transition_id: Some(transition.id.clone()),
        }
    }

    /// An incomplete rule recorded from a yes/no answer; `answer_closed`
    /// marks the given status as closed, otherwise everything stays unknown.
    pub fn from_answer(status: &str, answer_closed: bool) -> Self {
        Self {
            closed_status: answer_closed.then(|| status.to_string()),
            to_status: None,
            transition_id: None,
        }
    }
}

/// Nested project → issue type → [`Rule`] mapping.
///
/// Loaded once at process start, mutated in memory, written back once at
/// end of run. `BTreeMap` keeps the persisted file diff-friendly. The map
/// keys themselves enforce the one-rule-per-pair invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleStore {
    rules: BTreeMap<String, BTreeMap<String, Rule>>,
}

impl RuleStore {
    /// Load the store from a JSON file.
    ///
    /// A missing or unparseable file is not an error: the tool starts
    /// with an empty store and relearns, exactly as on first run. The
    /// caller gets a flag to warn the operator about the corrupt case.
    pub fn load(path: &Path) -> (Self, bool) {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return (Self::default(), false),
        };
        match serde_json::from_str(&contents) {
            Ok(store) => (store, false),
            Err(_) => (Self::default(), true),
        }
    }

    /// Write the store back as pretty-printed JSON, full overwrite.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut body = serde_json::to_string_pretty(&self.rules)?;
        body.push('\n');
        std::fs::write(path, body)
            .with_context(|| format!("failed to write rules file {}", path.display()))
    }

    pub fn get(&self, project: &str, issue_type: &str) -> Option<&Rule> {
        self.rules.get(project)?.get(issue_type)
    }

    /// Insert or overwrite the rule for a (project, issue type) pair.
    pub fn insert(&mut self, project: &str, issue_type: &str, rule: Rule) {
        self.rules
            .entry(project.to_string())
            .or_default()
            .insert(issue_type.to_string(), rule);
    }

    pub fn len(&self) -> usize {
        self.rules.values().map(|types| types.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
