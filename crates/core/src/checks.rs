use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::{InvocationError, config::CheckRunContext, models::Annotation};

/// The checks API accepts at most this many annotations per request.
pub const MAX_ANNOTATIONS_PER_REQUEST: usize = 50;

/// Output title shown on the check run.
pub const OUTPUT_TITLE: &str = "Result";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CheckRun {
    pub id: u64,
    pub name: String,
}

/// Body of a single check-run update.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CheckRunUpdate<'a> {
    pub name: &'a str,
    pub head_sha: &'a str,
    pub output: CheckRunOutput<'a>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CheckRunOutput<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub annotations: &'a [Annotation],
}

/// Access to the check runs of the repository being annotated.
#[async_trait]
pub trait CheckRunGateway: Send + Sync {
    /// Find the first in-progress check run named `check_name` on `head_sha`.
    async fn find_active(&self, check_name: &str, head_sha: &str) -> Result<Option<CheckRun>>;

    /// Replace the output of `check_run`. Each call replaces the annotations shown by the
    /// previous one.
    async fn update_output(&self, check_run: &CheckRun, update: &CheckRunUpdate<'_>)
    -> Result<()>;
}

/// Post `annotations` in consecutive chunks, stopping at the first failed request.
///
/// Every chunk carries the full summary. Returns the number of requests made.
pub async fn submit_annotations<G: CheckRunGateway + ?Sized>(
    gateway: &G,
    check_run: &CheckRun,
    context: &CheckRunContext,
    summary: &str,
    annotations: &[Annotation],
) -> Result<usize, InvocationError> {
    let total = annotations.len().div_ceil(MAX_ANNOTATIONS_PER_REQUEST);
    for (chunk, batch) in annotations.chunks(MAX_ANNOTATIONS_PER_REQUEST).enumerate() {
        let update = CheckRunUpdate {
            name: &context.check_name,
            head_sha: &context.head_sha,
            output: CheckRunOutput { title: OUTPUT_TITLE, summary, annotations: batch },
        };
        gateway
            .update_output(check_run, &update)
            .await
            .map_err(|source| InvocationError::Submission { chunk, source })?;
        tracing::info!(
            "Posted {} annotations to check run {} ({}/{})",
            batch.len(),
            check_run.id,
            chunk + 1,
            total
        );
    }
    Ok(total)
}
