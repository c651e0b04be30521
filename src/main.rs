use tracing_subscriber::EnvFilter;
use updater::RunSummary;
use updater::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    updater::run(&config).await?;

    println!("{}", RunSummary::completion_message(&config.manifest_path));
    Ok(())
}
