//! assetcat CLI
//!
//! Command-line interface for the asset catalog

use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::Context;
use config::{CliConfig, ConfigArgs};

#[derive(Debug, Parser)]
#[command(name = "assetcat")]
#[command(about = "assetcat - asset catalog lifecycle engine", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or migrate the catalog database
    Init,
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Node operations
    Node(commands::node::NodeArgs),
    /// Association operations
    Link(commands::link::LinkArgs),
    /// Asset operations
    Asset(commands::asset::AssetArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load(&cli.config)?;
    assetcat_core::logging_facility::init(config.log);

    let mut ctx = Context::open(&config)?;
    match cli.command {
        Commands::Init => commands::init::execute(&mut ctx),
        Commands::Seed(args) => commands::seed::execute(args, &mut ctx),
        Commands::Node(args) => commands::node::execute(args, &mut ctx),
        Commands::Link(args) => commands::link::execute(args, &mut ctx),
        Commands::Asset(args) => commands::asset::execute(args, &mut ctx),
    }
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
