use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply of `POST /rest/api/3/search/jql`. Only the keys are needed.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<IssueRef>,
}

#[derive(Debug, Deserialize)]
pub struct IssueRef {
    pub key: String,
}

/// What the fetcher persists for the formatter.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RawTicket {
    Idle(IdleMarker),
    Fetched(FetchedTicket),
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdleStatus {
    Idle,
}

#[derive(Debug, Serialize)]
pub struct IdleMarker {
    pub status: IdleStatus,
    pub jql: String,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct FetchedTicket {
    pub fetched_at: DateTime<Utc>,
    pub jql: String,
    pub issue_key: String,
    pub jira_url: String,
    /// Raw issue document, fields and renderedFields included.
    pub issue: Value,
}

impl RawTicket {
    pub fn idle(jql: &str) -> Self {
        RawTicket::Idle(IdleMarker {
            status: IdleStatus::Idle,
            jql: jql.to_string(),
            checked_at: Utc::now(),
        })
    }

    pub fn issue_key(&self) -> Option<&str> {
        match self {
            RawTicket::Fetched(ticket) => Some(&ticket.issue_key),
            RawTicket::Idle(_) => None,
        }
    }
}
