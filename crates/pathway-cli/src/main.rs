//! pathway CLI
//!
//! Dispatches requests against a JSON route table.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use pathway_cli::{Dispatcher, RouteFile};

/// Regex route table dispatcher.
#[derive(Parser)]
#[command(name = "pathway")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Route file (JSON).
    #[arg(short, long, env = "PATHWAY_ROUTES", default_value = "routes.json")]
    routes: PathBuf,

    /// Base path, overriding the one in the route file.
    #[arg(short, long)]
    base: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch one request and print every invocation as a JSON line.
    Dispatch {
        /// Request method.
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, optionally with a query string.
        path: String,
    },

    /// Validate every method and pattern in the route file.
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut file = RouteFile::load(&cli.routes)?;

    match cli.command {
        Commands::Dispatch { method, path } => {
            let dispatcher = Dispatcher::new(&file, cli.base.as_deref());
            let (calls, summary) = dispatcher.dispatch(&method, &path);
            for call in &calls {
                println!("{}", serde_json::to_string(call)?);
            }
            println!("{}", serde_json::to_string(&summary)?);
        }

        Commands::Check => {
            if let Some(base) = cli.base {
                file.base_path = base;
            }
            file.validate()?;
            info!(
                entries = file.len(),
                path = %cli.routes.display(),
                "Route file is valid"
            );
        }
    }

    Ok(())
}
