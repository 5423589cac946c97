use anyhow::Result;
use teams_scheduler::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
