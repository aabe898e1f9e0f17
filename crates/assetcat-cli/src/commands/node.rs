//! Node commands
//!
//! Usage: assetcat node <create|update|delete|undelete|purge|show|list|tree|links> ...

use clap::{Args, Subcommand};

use assetcat_core::model::{ListFilter, NodeDraft, NodeKind, NodeUpdate};
use assetcat_engine::EngineCommand;

use super::{print_json, CmdResult, Context};

#[derive(Debug, Args)]
pub struct NodeArgs {
    #[command(subcommand)]
    pub command: NodeCommand,
}

#[derive(Debug, Args)]
pub struct NodeRef {
    /// Node kind (plant, area, space, coordinate, asset, device, model, ...)
    pub kind: NodeKind,
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct TrashFlag {
    /// Include soft-deleted rows
    #[arg(long)]
    pub all: bool,
}

impl TrashFlag {
    fn filter(&self) -> ListFilter {
        if self.all {
            ListFilter::all()
        } else {
            ListFilter::active()
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum NodeCommand {
    /// Create a node
    Create {
        kind: NodeKind,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Scope parent id (plant for an area, device for a model, ...)
        #[arg(long)]
        parent: Option<i64>,
        /// Model id (assets only)
        #[arg(long)]
        model: Option<i64>,
    },
    /// Edit name and/or description
    Update {
        #[command(flatten)]
        node: NodeRef,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Soft-delete a node
    Delete(NodeRef),
    /// Restore a soft-deleted node
    Undelete(NodeRef),
    /// Physically remove a soft-deleted node and everything under it
    Purge(NodeRef),
    /// Show one node
    Show(NodeRef),
    /// List nodes of a kind
    List {
        kind: NodeKind,
        #[command(flatten)]
        trash: TrashFlag,
    },
    /// Nodes of a kind with their descendants and links
    Tree {
        kind: NodeKind,
        /// Only the subtree under this node
        id: Option<i64>,
        #[command(flatten)]
        trash: TrashFlag,
    },
    /// Links touching a node
    Links {
        #[command(flatten)]
        node: NodeRef,
        #[command(flatten)]
        trash: TrashFlag,
    },
}

pub fn execute(args: NodeArgs, ctx: &mut Context) -> CmdResult {
    match args.command {
        NodeCommand::Create {
            kind,
            name,
            description,
            parent,
            model,
        } => {
            let draft = NodeDraft {
                name,
                description,
                parent_id: parent,
                model_id: model,
            };
            print_json(&ctx.execute(EngineCommand::CreateNode { kind, draft })?)
        }
        NodeCommand::Update {
            node,
            name,
            description,
        } => print_json(&ctx.execute(EngineCommand::UpdateNode {
            kind: node.kind,
            id: node.id,
            update: NodeUpdate { name, description },
        })?),
        NodeCommand::Delete(node) => print_json(&ctx.execute(EngineCommand::MarkDeleteNode {
            kind: node.kind,
            id: node.id,
        })?),
        NodeCommand::Undelete(node) => {
            print_json(&ctx.execute(EngineCommand::MarkUndeleteNode {
                kind: node.kind,
                id: node.id,
            })?)
        }
        NodeCommand::Purge(node) => print_json(&ctx.execute(EngineCommand::PurgeNode {
            kind: node.kind,
            id: node.id,
        })?),
        NodeCommand::Show(node) => print_json(&ctx.catalog.get_node(node.kind, node.id)?),
        NodeCommand::List { kind, trash } => {
            print_json(&ctx.catalog.list_nodes(kind, trash.filter())?)
        }
        NodeCommand::Tree { kind, id, trash } => match id {
            Some(id) => print_json(&ctx.catalog.get_node_tree(kind, id, trash.filter())?),
            None => print_json(&ctx.catalog.list_nodes_with_children(kind, trash.filter())?),
        },
        NodeCommand::Links { node, trash } => print_json(&ctx.catalog.list_links_for_node(
            node.kind,
            node.id,
            trash.filter(),
        )?),
    }
}
