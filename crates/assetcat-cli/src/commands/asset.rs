//! Asset commands
//!
//! Usage: assetcat asset reassign-model <ASSET_ID> <MODEL_ID>

use clap::{Args, Subcommand};

use assetcat_engine::EngineCommand;

use super::{print_json, CmdResult, Context};

#[derive(Debug, Args)]
pub struct AssetArgs {
    #[command(subcommand)]
    pub command: AssetCommand,
}

#[derive(Debug, Subcommand)]
pub enum AssetCommand {
    /// Move an asset to another model, removing its model-dependent links
    ReassignModel {
        asset_id: i64,
        model_id: i64,
    },
}

pub fn execute(args: AssetArgs, ctx: &mut Context) -> CmdResult {
    match args.command {
        AssetCommand::ReassignModel { asset_id, model_id } => {
            let result = ctx.execute(EngineCommand::ReassignAssetModel { asset_id, model_id })?;
            print_json(&result)
        }
    }
}
