mod cmd;

use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let env_filter = EnvFilter::builder()
        // Default to info level
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: cmd::annotate::Args = argp::parse_args_or_exit(argp::DEFAULT);
    match cmd::annotate::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
