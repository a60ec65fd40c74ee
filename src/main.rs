//! Buildlight CLI entry point.

use clap::Parser;

use buildlight::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.resolved_command() {
        Commands::ListColors => commands::colors::execute(cli.json),
        Commands::Run => {
            commands::run::execute(cli.config.as_deref(), cli.log_level.as_deref()).await
        }
    };

    if let Err(err) = result {
        buildlight::cli::handle_error(&err, cli.json);
    }
}
