use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use super::error::TrackerError;
use super::types::{SearchResponse, Ticket, Transition, TransitionsResponse};

/// Tracker results are paged; one release never comes close to this.
const MAX_RESULTS: u32 = 500;

/// Gateway to the issue tracker, as consumed by the triage engine.
///
/// The engine only ever needs these three operations; the trait keeps the
/// decision procedure testable with an in-memory double instead of a live
/// tracker.
pub trait IssueGateway {
    /// Run a JQL query and return the matching tickets.
    async fn search_issues(&self, jql: &str) -> Result<Vec<Ticket>, TrackerError>;

    /// List the workflow transitions currently offered for a ticket.
    async fn list_transitions(&self, key: &str) -> Result<Vec<Transition>, TrackerError>;

    /// Execute a transition on a ticket.
    async fn apply_transition(&self, key: &str, transition_id: &str) -> Result<(), TrackerError>;
}

/// HTTP client for a Jira-style tracker REST API.
pub struct TrackerClient {
    base_url: String,
    username: String,
    token: String,
    client: Client,
}

impl TrackerClient {
    /// Create a client for the given tracker base URL with basic auth.
    pub fn new(base_url: String, username: String, token: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            token,
            client,
        }
    }

    /// Fetch a response body, mapping error statuses and unparseable
    /// bodies to the matching [`TrackerError`] variant.
    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TrackerError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TrackerError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TrackerError::Malformed(e.to_string()))
    }
}

impl IssueGateway for TrackerClient {
    async fn search_issues(&self, jql: &str) -> Result<Vec<Ticket>, TrackerError> {
        let url = format!("{}/rest/api/2/search", self.base_url);
        let max_results = MAX_RESULTS.to_string();
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.token))
            .query(&[
                ("jql", jql),
                ("fields", "status,issuetype,project"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await?;

        let body: SearchResponse = self.read_json(response).await?;
        Ok(body.issues.into_iter().map(Ticket::from).collect())
    }

    async fn list_transitions(&self, key: &str) -> Result<Vec<Transition>, TrackerError> {
        let url = format!("{}/rest/api/2/issue/{key}/transitions", self.base_url);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.token))
            .send()
            .await?;

        let body: TransitionsResponse = self.read_json(response).await?;
        Ok(body.transitions.into_iter().map(Transition::from).collect())
    }

    async fn apply_transition(&self, key: &str, transition_id: &str) -> Result<(), TrackerError> {
        let url = format!("{}/rest/api/2/issue/{key}/transitions", self.base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.token))
            .json(&json!({ "transition": { "id": transition_id } }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TrackerError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}
