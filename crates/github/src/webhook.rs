use std::path::Path;

use anyhow::{Context, Result, bail};
use octocrab::models::webhook_events::{WebhookEvent, WebhookEventPayload};

/// The event that started the workflow.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Trigger {
    Push { repository: Option<String> },
    Other(String),
}

/// Resolve the triggering event from `GITHUB_EVENT_NAME` and, for pushes, the payload at
/// `GITHUB_EVENT_PATH`.
pub fn resolve_trigger(event_name: &str, event_path: Option<&Path>) -> Result<Trigger> {
    if event_name != "push" {
        return Ok(Trigger::Other(event_name.to_string()));
    }
    let Some(event_path) = event_path else {
        return Ok(Trigger::Push { repository: None });
    };
    let body = std::fs::read(event_path)
        .with_context(|| format!("Failed to read event payload {}", event_path.display()))?;
    let event = WebhookEvent::try_from_header_and_body(event_name, &body)
        .with_context(|| format!("Failed to parse event payload {}", event_path.display()))?;
    if !matches!(event.specific, WebhookEventPayload::Push(_)) {
        bail!("Event payload {} is not a push event ({:?})", event_path.display(), event.kind);
    }
    let repository = event.repository.and_then(|r| r.full_name);
    if let Some(full_name) = &repository {
        tracing::info!("Handling push event from repository {}", full_name);
    } else if let Some(sender) = &event.sender {
        tracing::info!("Handling push event from @{}", sender.login);
    }
    Ok(Trigger::Push { repository })
}
