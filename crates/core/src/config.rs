use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_EVENT_NAME: &str = "push";

/// Everything an invocation needs from the GitHub Actions environment, read once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct ActionConfig {
    pub github: GitHubConfig,
    pub owner: String,
    pub repo: String,
    pub head_sha: String,
    pub check_name: String,
    pub workspace: Option<String>,
    pub event_name: String,
    pub event_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GitHubConfig {
    #[serde(skip_serializing)]
    pub token: String,
    pub api_url: String,
}

/// The subset of [`ActionConfig`] the annotation pipeline works with.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CheckRunContext {
    pub check_name: String,
    pub head_sha: String,
    pub workspace: Option<String>,
}

impl ActionConfig {
    /// Build the configuration from a variable lookup, usually `std::env::var`. Empty values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required =
            |key: &str| var(key).with_context(|| format!("Missing environment variable {key}"));

        let repository = required("GITHUB_REPOSITORY")?;
        let Some((owner, repo)) = repository.split_once('/') else {
            bail!("GITHUB_REPOSITORY must be in the form owner/name, got '{repository}'");
        };
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            bail!("GITHUB_REPOSITORY must be in the form owner/name, got '{repository}'");
        }

        Ok(Self {
            github: GitHubConfig {
                token: required("GITHUB_TOKEN")?,
                api_url: var("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            },
            owner: owner.to_string(),
            repo: repo.to_string(),
            head_sha: required("GITHUB_SHA")?,
            check_name: required("GITHUB_ACTION")?,
            workspace: var("GITHUB_WORKSPACE"),
            event_name: var("GITHUB_EVENT_NAME").unwrap_or_else(|| DEFAULT_EVENT_NAME.to_string()),
            event_path: var("GITHUB_EVENT_PATH").map(PathBuf::from),
        })
    }

    pub fn check_run_context(&self) -> CheckRunContext {
        CheckRunContext {
            check_name: self.check_name.clone(),
            head_sha: self.head_sha.clone(),
            workspace: self.workspace.clone(),
        }
    }
}
