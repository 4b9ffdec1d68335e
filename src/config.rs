use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, Result};

/// Environment variable that may carry the API token instead of the file.
pub const TOKEN_ENV_VAR: &str = "JIRA_API_TOKEN";

/// Labels Jira automation attaches to new issues that a provisioned issue
/// should not keep.
pub const DEFAULT_DISPOSABLE_LABELS: &[&str] = &["to-be-groomed"];

const LOCAL_CONFIG: &str = "provision.toml";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub jira: JiraConfig,
    pub issue: IssueConfig,
}

#[derive(Debug, Deserialize)]
pub struct JiraConfig {
    /// Site root, e.g. `https://example.atlassian.net`.
    pub url: String,
    pub username: String,
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueConfig {
    pub project_key: String,
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    pub issuetype: String,
    /// Fragment of the assignee's display name.
    pub assignee: String,
    pub status: String,
    #[serde(default = "default_disposable_labels")]
    pub remove_labels: Vec<String>,
    /// Extra fields keyed by display name.
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// Fully resolved connection settings.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub url: String,
    pub username: String,
    pub api_token: String,
}

fn default_disposable_labels() -> Vec<String> {
    DEFAULT_DISPOSABLE_LABELS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProvisionError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ProvisionError::Config(msg) => {
                ProvisionError::config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(contents).map_err(|e| ProvisionError::config(e.message()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("jira.url", &self.jira.url),
            ("jira.username", &self.jira.username),
            ("issue.project_key", &self.issue.project_key),
            ("issue.summary", &self.issue.summary),
            ("issue.issuetype", &self.issue.issuetype),
            ("issue.assignee", &self.issue.assignee),
            ("issue.status", &self.issue.status),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ProvisionError::config(format!("`{key}` must not be empty")));
            }
        }
        Ok(())
    }
}

impl JiraConfig {
    /// Pick the API token from exactly one source: the config file or
    /// `env_token` (the value of [`TOKEN_ENV_VAR`]). Empty values count as
    /// unset.
    pub fn credentials(&self, env_token: Option<String>) -> Result<Credentials> {
        let file_token = self.api_token.clone().filter(|t| !t.is_empty());
        let env_token = env_token.filter(|t| !t.is_empty());

        let api_token = match (file_token, env_token) {
            (Some(token), None) | (None, Some(token)) => token,
            (Some(_), Some(_)) => {
                return Err(ProvisionError::config(format!(
                    "API token is set both in the config file and in ${TOKEN_ENV_VAR}; keep only one"
                )))
            }
            (None, None) => {
                return Err(ProvisionError::config(format!(
                    "no API token: set `jira.api_token` in the config file or ${TOKEN_ENV_VAR}"
                )))
            }
        };

        Ok(Credentials {
            url: self.url.trim_end_matches('/').to_string(),
            username: self.username.clone(),
            api_token,
        })
    }
}

/// `./provision.toml` when it exists, else `~/.jira-provision/config.toml`.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return local;
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".jira-provision")
        .join("config.toml")
}
