pub mod annotations;
pub mod checks;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod summary;
pub mod util;

use thiserror::Error;

/// Terminal outcome of a failed invocation.
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("Failed to decode test report: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to look up check run")]
    Lookup(#[source] anyhow::Error),
    #[error("Unable to find check run for action: {0}")]
    CheckRunNotFound(String),
    #[error("Failed to submit annotation chunk {chunk}")]
    Submission {
        chunk: usize,
        #[source]
        source: anyhow::Error,
    },
    /// Not a technical error: the report itself was unsuccessful.
    #[error("{0}")]
    TestsFailed(String),
}
