use crate::config::settings::JiraConfig;
use crate::errors::{Result, TicketError};
use crate::models::ticket::{FetchedTicket, IssueRef, RawTicket, SearchResponse};
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct JiraClient {
    client: Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.host.clone(),
            email: config.email.clone(),
            api_token: config.api_token.clone(),
        })
    }

    pub fn browse_url(&self, issue_key: &str) -> String {
        format!("{}/browse/{}", self.base_url, issue_key)
    }

    pub async fn search_jql(&self, jql: &str, max_results: u32) -> Result<Vec<IssueRef>> {
        let url = format!("{}/rest/api/3/search/jql", self.base_url);

        let body = serde_json::json!({
            "jql": jql,
            "maxResults": max_results,
            "fields": ["*all"],
        });

        tracing::debug!(%url, %jql, max_results, "Searching Jira");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .json(&body)
            .send()
            .await?;

        let search = check_status(response)
            .await?
            .json::<SearchResponse>()
            .await?;

        tracing::debug!(count = search.issues.len(), "Search returned");
        Ok(search.issues)
    }

    /// Full issue with every field plus `renderedFields` and `changelog`.
    pub async fn get_issue(&self, issue_key: &str) -> Result<Value> {
        let url = format!(
            "{}/rest/api/3/issue/{}",
            self.base_url,
            urlencoding::encode(issue_key)
        );

        tracing::debug!(%url, "Fetching issue");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .query(&[("fields", "*all"), ("expand", "renderedFields,changelog")])
            .send()
            .await?;

        let issue = check_status(response).await?.json::<Value>().await?;
        Ok(issue)
    }

    /// Top-ranked issue for `jql`, or an idle marker when nothing matches.
    pub async fn fetch_top(&self, jql: &str) -> Result<RawTicket> {
        let issues = self.search_jql(jql, 1).await?;

        let Some(top) = issues.into_iter().next() else {
            tracing::info!("No issue matched, idle");
            return Ok(RawTicket::idle(jql));
        };

        let issue = self.get_issue(&top.key).await?;
        tracing::info!(key = %top.key, "Fetched issue");

        Ok(RawTicket::Fetched(FetchedTicket {
            fetched_at: Utc::now(),
            jql: jql.to_string(),
            jira_url: self.browse_url(&top.key),
            issue_key: top.key,
            issue,
        }))
    }
}

/// Turns any status >= 400 into `TicketError::JiraApi`, keeping the body as
/// JSON when it parses and as raw text otherwise.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.as_u16() < 400 {
        return Ok(response);
    }

    let url = response.url().to_string();
    let text = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<Value>(&text) {
        Ok(json) => json.to_string(),
        Err(_) => text,
    };

    tracing::warn!(status = status.as_u16(), %url, "Jira request failed");

    Err(TicketError::JiraApi {
        status: status.as_u16(),
        url,
        detail,
    })
}
