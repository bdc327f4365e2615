use clap::Parser;

mod commands;
mod error;
mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = settings::Cli::parse();
    let settings = settings::load(&cli.overrides)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "orgquery={level},client={level},engine={level},fixture_server={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = commands::run(&settings, cli.command).await {
        tracing::error!("{err}");
        return Err(err.into());
    }

    Ok(())
}
