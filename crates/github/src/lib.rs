pub mod webhook;

use anyhow::{Context, Result};
use async_trait::async_trait;
use http::StatusCode;
use jest_checks_core::{
    checks::{CheckRun, CheckRunGateway, CheckRunUpdate},
    config::ActionConfig,
};
use octocrab::{GitHubError, Octocrab};
use serde::{Deserialize, Serialize};

/// Check-run access for a single repository.
#[derive(Clone)]
pub struct GitHub {
    pub client: Octocrab,
    pub owner: String,
    pub repo: String,
}

#[derive(Serialize)]
struct ListCheckRunsParams<'a> {
    check_name: &'a str,
    status: &'a str,
}

#[derive(Deserialize)]
struct CheckRunList {
    total_count: u64,
    check_runs: Vec<CheckRunItem>,
}

#[derive(Deserialize)]
struct CheckRunItem {
    id: u64,
    name: String,
}

impl From<CheckRunItem> for CheckRun {
    fn from(value: CheckRunItem) -> Self { Self { id: value.id, name: value.name } }
}

impl GitHub {
    pub fn new(config: &ActionConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(config.github.token.clone())
            .base_uri(config.github.api_url.as_str())
            .with_context(|| format!("Invalid GitHub API URL '{}'", config.github.api_url))?
            .build()
            .context("Failed to create GitHub client")?;
        Ok(Self { client, owner: config.owner.clone(), repo: config.repo.clone() })
    }

    fn check_runs_for_ref_route(&self, head_sha: &str) -> String {
        format!("/repos/{}/{}/commits/{}/check-runs", self.owner, self.repo, head_sha)
    }

    fn check_run_route(&self, check_run_id: u64) -> String {
        format!("/repos/{}/{}/check-runs/{}", self.owner, self.repo, check_run_id)
    }
}

#[async_trait]
impl CheckRunGateway for GitHub {
    async fn find_active(&self, check_name: &str, head_sha: &str) -> Result<Option<CheckRun>> {
        let params = ListCheckRunsParams { check_name, status: "in_progress" };
        let result: CheckRunList =
            match self.client.get(self.check_runs_for_ref_route(head_sha), Some(&params)).await {
                Ok(result) => result,
                Err(octocrab::Error::GitHub { source, .. })
                    if matches!(*source, GitHubError {
                        status_code: StatusCode::NOT_FOUND,
                        ..
                    }) =>
                {
                    tracing::warn!(
                        "Commit {} not found in {}/{}",
                        head_sha,
                        self.owner,
                        self.repo
                    );
                    return Ok(None);
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!(
                            "Failed to list check runs for {}/{}@{}",
                            self.owner, self.repo, head_sha
                        )
                    });
                }
            };
        tracing::debug!(
            "Found {} in-progress check runs named {} on {}",
            result.total_count,
            check_name,
            head_sha
        );
        Ok(result.check_runs.into_iter().next().map(CheckRun::from))
    }

    async fn update_output(
        &self,
        check_run: &CheckRun,
        update: &CheckRunUpdate<'_>,
    ) -> Result<()> {
        let _: CheckRunItem = self
            .client
            .patch(self.check_run_route(check_run.id), Some(update))
            .await
            .with_context(|| format!("Failed to update check run {}", check_run.id))?;
        Ok(())
    }
}
