use clap::Parser;
use counterdesk::cli::{Cli, run};
use counterdesk_observability::init_basic_console_logging;
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_basic_console_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}
