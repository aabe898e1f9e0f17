//! Association commands
//!
//! Usage: assetcat link <add|update|delete|purge|list> <KIND> ...

use clap::{Args, Subcommand};

use assetcat_core::model::{AssociationKey, AssociationKind, ListFilter};
use assetcat_engine::EngineCommand;

use super::{print_json, CmdResult, Context};

#[derive(Debug, Args)]
pub struct LinkArgs {
    #[command(subcommand)]
    pub command: LinkCommand,
}

#[derive(Debug, Args)]
pub struct LinkRef {
    /// Association kind (asset_category, model_parameter, ...)
    pub kind: AssociationKind,
    pub left_id: i64,
    pub right_id: i64,
}

impl LinkRef {
    fn key(&self) -> AssociationKey {
        AssociationKey::new(self.kind, self.left_id, self.right_id)
    }
}

#[derive(Debug, Subcommand)]
pub enum LinkCommand {
    /// Create a link, or reactivate/refresh an existing one
    Add {
        #[command(flatten)]
        link: LinkRef,
        /// Value (asset_detail and model_parameter only)
        #[arg(long)]
        value: Option<String>,
    },
    /// Overwrite the value of an active link
    Update {
        #[command(flatten)]
        link: LinkRef,
        #[arg(long)]
        value: Option<String>,
    },
    /// Soft-delete a link
    Delete(LinkRef),
    /// Physically remove a soft-deleted link
    Purge(LinkRef),
    /// List links of a kind
    List {
        kind: AssociationKind,
        /// Include soft-deleted rows
        #[arg(long)]
        all: bool,
    },
}

pub fn execute(args: LinkArgs, ctx: &mut Context) -> CmdResult {
    match args.command {
        LinkCommand::Add { link, value } => {
            print_json(&ctx.execute(EngineCommand::AddOrReactivateLink {
                key: link.key(),
                value,
            })?)
        }
        LinkCommand::Update { link, value } => print_json(&ctx.execute(EngineCommand::UpdateLink {
            key: link.key(),
            value,
        })?),
        LinkCommand::Delete(link) => {
            print_json(&ctx.execute(EngineCommand::MarkDeleteLink { key: link.key() })?)
        }
        LinkCommand::Purge(link) => {
            print_json(&ctx.execute(EngineCommand::PurgeLink { key: link.key() })?)
        }
        LinkCommand::List { kind, all } => {
            let filter = if all {
                ListFilter::all()
            } else {
                ListFilter::active()
            };
            print_json(&ctx.catalog.list_associations(kind, filter)?)
        }
    }
}
