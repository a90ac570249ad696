use slotwise::commands::Cli;
use slotwise::libs::logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();
    Cli::menu().await
}
