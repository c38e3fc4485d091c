use colored::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TicketError {
    // Configuration errors
    #[error("Missing required env var: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // Jira errors
    #[error("Jira request failed\nStatus: {status}\nURL: {url}\nResponse: {detail}")]
    JiraApi {
        status: u16,
        url: String,
        detail: String,
    },

    #[error("Unexpected Jira response{}: {detail}", .url.as_deref().map(|u| format!(" from {}", u)).unwrap_or_default())]
    UnexpectedResponse { url: Option<String>, detail: String },

    // Network errors
    #[error("Network error: {0}")]
    Network(String),

    // State file errors
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Malformed ticket data in {}: {source}", .path.display())]
    InvalidPayload {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TicketError {
    /// Multi-line, colored rendering printed by `main` before exiting.
    pub fn report(&self) -> String {
        let mut out = String::new();

        match self {
            TicketError::MissingEnv(name) => {
                out.push_str(&format!("{}\n", format!("Missing required env var: {}", name).red().bold()));
                out.push_str(&format!("   {}\n\n", "The fetcher needs Jira credentials to run".dimmed()));
                out.push_str("   To fix:\n");
                out.push_str(&format!("   1. Export it: {}\n", format!("export {}=...", name).green()));
                out.push_str("   2. Or add it to a .env file in the working directory\n");
                out.push_str(&format!("   3. Check what is resolved: {}", "jira-next config show".green()));
            }
            TicketError::ConfigInvalid(msg) => {
                out.push_str(&format!("{}\n", "Invalid configuration".red().bold()));
                out.push_str(&format!("   {}\n\n", msg.dimmed()));
                out.push_str("   To fix:\n");
                out.push_str("   1. Check jira-next.toml in the working directory\n");
                out.push_str("   2. Check the JIRA_* environment variables");
            }
            TicketError::JiraApi { status, url, detail } => {
                out.push_str(&format!("{}\n", "Jira request failed".red().bold()));
                out.push_str(&format!("   Status: {}\n", status));
                out.push_str(&format!("   URL: {}\n", url));
                out.push_str(&format!("   Response: {}", detail.dimmed()));
                if *status == 401 || *status == 403 {
                    out.push_str("\n\n   To fix:\n");
                    out.push_str(&format!(
                        "   1. Generate new token: {}\n",
                        "https://id.atlassian.com/manage-profile/security/api-tokens".cyan()
                    ));
                    out.push_str("   2. Update JIRA_EMAIL / JIRA_API_TOKEN");
                }
            }
            TicketError::UnexpectedResponse { url, detail } => {
                out.push_str(&format!("{}\n", "Jira returned an unexpected response".red().bold()));
                if let Some(url) = url {
                    out.push_str(&format!("   URL: {}\n", url));
                }
                out.push_str(&format!("   {}\n\n", detail.dimmed()));
                out.push_str("   To fix:\n");
                out.push_str("   1. Check JIRA_HOST points at a Jira Cloud site\n");
                out.push_str(&format!("   2. Re-run with {} to see the request", "--verbose".green()));
            }
            TicketError::Network(msg) => {
                out.push_str(&format!("{}\n", "Network error".red().bold()));
                out.push_str(&format!("   {}\n\n", msg.dimmed()));
                out.push_str("   To fix:\n");
                out.push_str("   1. Check your internet connection\n");
                out.push_str("   2. Verify JIRA_HOST is reachable\n");
                out.push_str("   3. Try again in a moment");
            }
            TicketError::InputNotFound(path) => {
                out.push_str(&format!("{}\n", format!("Input file not found: {}", path.display()).red().bold()));
                out.push_str(&format!("   {}\n\n", "Nothing has been fetched yet".dimmed()));
                out.push_str(&format!("   To fix: {}", "jira-next fetch".green()));
            }
            other => {
                out.push_str(&format!("{}\n", "Error".red().bold()));
                out.push_str(&format!("   {}", other.to_string().dimmed()));
            }
        }

        out
    }
}

impl From<reqwest::Error> for TicketError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TicketError::UnexpectedResponse {
                url: err.url().map(|u| u.to_string()),
                detail: err.to_string(),
            }
        } else if let (Some(status), false) = (err.status(), err.is_timeout() || err.is_connect()) {
            TicketError::JiraApi {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
                detail: err.to_string(),
            }
        } else {
            TicketError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, TicketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jira_api_message_lists_status_url_and_detail() {
        let err = TicketError::JiraApi {
            status: 404,
            url: "https://jira.example.com/rest/api/3/issue/X-1".to_string(),
            detail: "{\"errorMessages\":[\"gone\"]}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Jira request failed\n"));
        assert!(msg.contains("Status: 404"));
        assert!(msg.contains("URL: https://jira.example.com/rest/api/3/issue/X-1"));
        assert!(msg.contains("errorMessages"));
    }

    #[test]
    fn test_missing_env_report_names_variable() {
        colored::control::set_override(false);
        let report = TicketError::MissingEnv("JIRA_HOST").report();
        assert!(report.starts_with("Missing required env var: JIRA_HOST"));
        assert!(report.contains("export JIRA_HOST=..."));
    }

    #[test]
    fn test_unexpected_response_report_skips_network_hint() {
        colored::control::set_override(false);
        let err = TicketError::UnexpectedResponse {
            url: Some("https://jira.example.com/rest/api/3/search/jql".to_string()),
            detail: "missing field `key`".to_string(),
        };
        let report = err.report();
        assert!(report.starts_with("Jira returned an unexpected response"));
        assert!(report.contains("missing field `key`"));
        assert!(!report.contains("internet connection"));
        assert_eq!(
            err.to_string(),
            "Unexpected Jira response from https://jira.example.com/rest/api/3/search/jql: missing field `key`"
        );
    }

    #[test]
    fn test_input_not_found_display() {
        let err = TicketError::InputNotFound(PathBuf::from("state/raw.json"));
        assert_eq!(err.to_string(), "Input file not found: state/raw.json");
    }
}
