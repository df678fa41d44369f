use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use homeutils::{output, Config, HomeutilsError, TranscriptCli, TranscriptPipeline};

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

    let cli = TranscriptCli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        let code = e
            .downcast_ref::<HomeutilsError>()
            .map(HomeutilsError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: TranscriptCli) -> homeutils::Result<()> {
    let config = Config::load().await?;

    if cli.api_key.is_none() && !cli.no_summary {
        println!("Note: GEMINI_API_KEY is not set, skipping AI analysis.");
        println!("Get a free key from https://ai.google.dev to enable it.\n");
    }

    println!("Processing: {}", cli.url);

    let pipeline = TranscriptPipeline::new(config)?;
    let digest = pipeline
        .run(&cli.url, cli.output, cli.api_key.as_deref(), cli.no_summary)
        .await?;

    output::print_report(&digest);
    Ok(())
}
