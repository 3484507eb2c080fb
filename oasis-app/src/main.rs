use anyhow::Result;
use clap::Parser;
use oasis_app::bootstrap;
use oasis_app::cli::{Cli, Commands};
use oasis_app::commands;

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap::init_tracing();
    let cli = Cli::parse();

    let config_path = bootstrap::config_path(&cli.data_dir, cli.config.as_deref());
    let config = match bootstrap::load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Tip: fix or delete {} to fall back to defaults", config_path.display());
            return Err(e);
        }
    };

    let mut controller = bootstrap::open_controller(&cli.data_dir, config).await?;
    let command = cli.command.unwrap_or(Commands::Repl);
    commands::dispatch(&mut controller, command, &cli.data_dir).await
}
