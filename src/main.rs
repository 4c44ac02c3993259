//! classroll server binary

use clap::Parser;

use classroll::cli::{self, Cli, Commands};
use classroll::error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(&cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    log::debug!("Debug logging enabled");
}

async fn run(cli: &Cli) -> Result<()> {
    match cli.command {
        Commands::Serve => cli::serve::run(cli).await,
        Commands::Status => cli::status::run(cli),
        Commands::Version => {
            println!("classroll version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
