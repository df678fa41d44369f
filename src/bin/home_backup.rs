use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use homeutils::backup::BackupRun;
use homeutils::{BackupCli, Config, HomeutilsError};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homeutils=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = BackupCli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        // An archive failure propagates tar's own exit code
        let code = e
            .downcast_ref::<HomeutilsError>()
            .map(HomeutilsError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: BackupCli) -> homeutils::Result<()> {
    let config = Config::load().await?;
    let run = BackupRun::from_cli(&cli, &config)?;
    run.execute().await
}
