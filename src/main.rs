use clap::Parser;

use itinerary_lib::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; it only supplies API keys.
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    itinerary_lib::run(cli).await?;
    Ok(())
}
