use crate::errors::{Result, TicketError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_JQL: &str = "filter = Fetch_Next order by rank asc";
pub const DEFAULT_STATE_DIR: &str = ".claude/state";
pub const CONFIG_FILE: &str = "jira-next.toml";

const RAW_TICKET_FILE: &str = "raw-ticket.json";
const MARKDOWN_FILE: &str = "raw-ticket.md";

/// Everything the tool reads from its environment, resolved once at startup.
///
/// Sources, lowest precedence first: defaults, `jira-next.toml`, `.env`,
/// then `JIRA_*` process variables (`JIRA_HOST` → `host`, and so on).
#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_jql")]
    pub jql: String,
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
}

/// Validated credentials for the fetcher.
#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub host: String,
    pub email: String,
    pub api_token: String,
}

fn default_jql() -> String {
    DEFAULT_JQL.to_string()
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_DIR)
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Resolves settings with `dir` as the working directory: `.env` and
    /// `jira-next.toml` are looked up there. Variables already set in the
    /// process win over `.env`.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let env_file = dir.join(".env");
        if dotenvy::from_path(&env_file).is_ok() {
            tracing::debug!("Loaded environment from {}", env_file.display());
        }

        let config = ::config::Config::builder()
            .add_source(::config::File::from(dir.join(CONFIG_FILE)).required(false))
            .add_source(::config::Environment::with_prefix("JIRA"))
            .build()
            .map_err(|e| TicketError::ConfigInvalid(e.to_string()))?;

        Self::from_config(config)
    }

    pub fn from_config(config: ::config::Config) -> Result<Self> {
        config
            .try_deserialize()
            .map_err(|e| TicketError::ConfigInvalid(e.to_string()))
    }

    /// Credentials needed to talk to Jira. Empty values count as missing.
    pub fn jira(&self) -> Result<JiraConfig> {
        let host = required(&self.host, "JIRA_HOST")?;
        let email = required(&self.email, "JIRA_EMAIL")?;
        let api_token = required(&self.api_token, "JIRA_API_TOKEN")?;

        Ok(JiraConfig {
            host: host.trim_end_matches('/').to_string(),
            email: email.to_string(),
            api_token: api_token.to_string(),
        })
    }

    pub fn raw_ticket_path(&self) -> PathBuf {
        self.state_dir.join(RAW_TICKET_FILE)
    }

    pub fn markdown_path(&self) -> PathBuf {
        self.state_dir.join(MARKDOWN_FILE)
    }

    pub fn config_file() -> &'static Path {
        Path::new(CONFIG_FILE)
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TicketError::MissingEnv(name)),
    }
}

pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}
