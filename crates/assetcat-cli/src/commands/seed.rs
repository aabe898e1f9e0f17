//! Seed import command
//!
//! Usage: assetcat seed import <PATH>

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use assetcat_engine::{EngineCommand, EngineCommandResult};
use assetcat_store::seed::parse_seed_file;

use super::{print_json, CmdResult, Context};

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file, or every seed in a directory
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

/// Execute seed command
pub fn execute(args: SeedArgs, ctx: &mut Context) -> CmdResult {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, ctx),
    }
}

fn seed_files(path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    // Sorted so a directory imports in a stable order
    let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn execute_import(args: ImportArgs, ctx: &mut Context) -> CmdResult {
    let mut summaries = Vec::new();
    for file in seed_files(&args.path)? {
        eprintln!("Importing {}...", file.display());
        let seed = parse_seed_file(&file)?;
        let result = ctx.execute(EngineCommand::ImportSeed {
            seed: Box::new(seed),
            source: Some(file.display().to_string()),
        })?;
        if let EngineCommandResult::SeedImported(summary) = result {
            summaries.push(summary);
        }
    }
    print_json(&summaries)
}
