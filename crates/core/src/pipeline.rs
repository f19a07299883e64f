use crate::{
    InvocationError,
    annotations::derive_annotations,
    checks::{CheckRunGateway, submit_annotations},
    config::CheckRunContext,
    models::Report,
    summary::format_summary,
};

/// Run one pass from raw report bytes to posted annotations.
///
/// Returns `Ok(())` only when the report was successful, in which case the gateway is never
/// called. After a failed report has been annotated the result is
/// [`InvocationError::TestsFailed`] carrying the summary.
pub async fn run<G: CheckRunGateway + ?Sized>(
    input: &[u8],
    context: &CheckRunContext,
    gateway: &G,
) -> Result<(), InvocationError> {
    let report = Report::parse(input)?;
    annotate_report(&report, context, gateway).await
}

/// Same as [`run`] for an already decoded report.
pub async fn annotate_report<G: CheckRunGateway + ?Sized>(
    report: &Report,
    context: &CheckRunContext,
    gateway: &G,
) -> Result<(), InvocationError> {
    if report.success {
        tracing::info!("All {} tests passed", report.num_total_tests);
        return Ok(());
    }

    let check_run = gateway
        .find_active(&context.check_name, &context.head_sha)
        .await
        .map_err(InvocationError::Lookup)?
        .ok_or_else(|| InvocationError::CheckRunNotFound(context.check_name.clone()))?;
    tracing::info!("Found check run {} ({})", check_run.name, check_run.id);

    let annotations = derive_annotations(report, context.workspace.as_deref());
    let summary = format_summary(report);
    submit_annotations(gateway, &check_run, context, &summary, &annotations).await?;

    Err(InvocationError::TestsFailed(summary))
}
