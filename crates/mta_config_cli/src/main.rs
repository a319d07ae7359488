use clap::{Parser, Subcommand};
use mta_config_cli::commands::{
    criteria_cmd::{self, CriteriaArgs},
    resolve_cmd::{self, ResolveArgs},
};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// mta-config: dry-run configuration reference resolution for MTA deployments
#[derive(Parser, Debug)]
#[command(name = "mta-config")]
#[command(
    about = "Resolve MTA configuration references and build label selectors",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the configuration references of a descriptor
    Resolve(ResolveArgs),

    /// Build a label selector
    Criteria(CriteriaArgs),

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("MTA_CONFIG_LOG"))
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Resolve(args) => resolve_cmd::execute(args).await,
        Commands::Criteria(args) => criteria_cmd::execute(args),
        Commands::Version => Ok(format!(
            "mta-config version {}",
            option_env!("MTA_CONFIG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
        )),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!("Error: {e}");
            std::process::exit(1);
        }
    }
}
