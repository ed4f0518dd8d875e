use clap::Parser;
use service_account_auth::ANALYTICS_READONLY;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Print an OAuth2 access token for a service account.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Service account key file.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS", default_value = "key.json")]
    key_file: PathBuf,
    /// Scope to request. Repeat the flag or separate with commas for several.
    #[arg(
        long = "scope",
        env = "SCOPES",
        value_delimiter = ',',
        default_value = ANALYTICS_READONLY,
    )]
    scopes: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args);

    let scopes = args
        .scopes
        .iter()
        .map(|scope| scope.trim())
        .filter(|scope| !scope.is_empty())
        .collect::<Vec<_>>();
    let token =
        service_account_auth::fetch_token(&reqwest::Client::new(), &args.key_file, &scopes)
            .await?;
    println!("{}", token.access_token);

    Ok(())
}
