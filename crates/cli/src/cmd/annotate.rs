use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use argp::FromArgs;
use jest_checks_core::{
    InvocationError, config::ActionConfig, models::Report, pipeline, summary::format_summary,
};
use jest_checks_github::{
    GitHub,
    webhook::{Trigger, resolve_trigger},
};

#[derive(FromArgs, PartialEq, Eq, Debug, Default)]
/// Post failing Jest tests as annotations on the running GitHub check run.
pub struct Args {
    #[argp(option, short = 'i')]
    /// read the Jest JSON report from a file instead of stdin
    input: Option<PathBuf>,
    #[argp(option)]
    /// workspace root stripped from annotation paths (default: $GITHUB_WORKSPACE)
    workspace: Option<String>,
    #[argp(option)]
    /// name of the check run to annotate (default: $GITHUB_ACTION)
    check_name: Option<String>,
}

pub async fn run(args: Args) -> Result<()> {
    run_with_env(args, |key| std::env::var(key).ok()).await
}

async fn run_with_env(args: Args, env: impl Fn(&str) -> Option<String>) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    let report = Report::parse(&input).map_err(InvocationError::Decode)?;
    if report.success {
        tracing::info!("All tests passed, nothing to annotate");
        return Ok(());
    }

    let config = load_config(&args, env)?;
    let trigger = resolve_trigger(&config.event_name, config.event_path.as_deref())?;
    if let Trigger::Other(event_name) = trigger {
        tracing::warn!("Ignoring {} event, only push events are annotated", event_name);
        return Err(InvocationError::TestsFailed(format_summary(&report)).into());
    }

    let github = GitHub::new(&config)?;
    pipeline::annotate_report(&report, &config.check_run_context(), &github).await?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut data = Vec::new();
            std::io::stdin().read_to_end(&mut data).context("Failed to read stdin")?;
            Ok(data)
        }
    }
}

/// Command-line options take precedence over their environment variables.
fn load_config(args: &Args, env: impl Fn(&str) -> Option<String>) -> Result<ActionConfig> {
    ActionConfig::from_lookup(|key| {
        let arg = match key {
            "GITHUB_ACTION" => args.check_name.clone(),
            "GITHUB_WORKSPACE" => args.workspace.clone(),
            _ => None,
        };
        arg.or_else(|| env(key))
    })
}
