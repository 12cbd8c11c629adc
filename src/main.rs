use and_cli::config::{Settings, env_vars};
use and_cli::error::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_env(env_vars::LOG)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(err) = and_cli::run::run(args, Settings::from_env(), None).await {
        if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }
        let crate_error = err.downcast_ref::<Error>();
        // Missing parameters are logged where they are detected.
        if !matches!(crate_error, Some(Error::MissingParameter { .. })) {
            error!("{err:#}");
        }
        std::process::exit(crate_error.map_or(2, Error::exit_code));
    }
}
