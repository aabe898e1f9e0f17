// Integration tests for the command-enum surface

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use assetcat_core::errors::ExErrorKind;
use assetcat_core::model::{AssociationKey, AssociationKind, NodeDraft, NodeKind, NodeUpdate};
use assetcat_engine::{EngineCommand, EngineCommandResult, LinkOutcome};
use assetcat_store::seed::parse_seed_str;
use common::{build_site, editor, new_catalog};

#[test]
fn test_node_commands_round_trip() {
    let mut catalog = new_catalog();

    let created = catalog
        .execute(
            EngineCommand::CreateNode {
                kind: NodeKind::Situation,
                draft: NodeDraft::named("Leak"),
            },
            &editor(),
        )
        .unwrap();
    let EngineCommandResult::NodeCreated { kind, id } = created else {
        panic!("unexpected result {:?}", created);
    };
    assert_eq!(kind, NodeKind::Situation);

    let steps = [
        EngineCommand::UpdateNode {
            kind,
            id,
            update: NodeUpdate {
                name: Some("Seal Leak".to_string()),
                description: None,
            },
        },
        EngineCommand::MarkDeleteNode { kind, id },
        EngineCommand::MarkUndeleteNode { kind, id },
        EngineCommand::MarkDeleteNode { kind, id },
        EngineCommand::PurgeNode { kind, id },
    ];
    let results: Vec<EngineCommandResult> = steps
        .into_iter()
        .map(|cmd| catalog.execute(cmd, &editor()).unwrap())
        .collect();

    assert_eq!(
        results,
        vec![
            EngineCommandResult::NodeUpdated { kind, id },
            EngineCommandResult::NodeDeleted { kind, id },
            EngineCommandResult::NodeRestored { kind, id },
            EngineCommandResult::NodeDeleted { kind, id },
            EngineCommandResult::NodePurged { kind, id },
        ]
    );
}

#[test]
fn test_link_and_reassign_commands() {
    let mut catalog = new_catalog();
    let site = build_site(&mut catalog);
    let detail = common::create(&mut catalog, NodeKind::Detail, NodeDraft::named("Serial"));
    let other_model = common::create(
        &mut catalog,
        NodeKind::Model,
        NodeDraft::named("CP-300").under(site.device),
    );
    let key = AssociationKey::new(AssociationKind::AssetDetail, site.asset, detail);

    let written = catalog
        .execute(
            EngineCommand::AddOrReactivateLink {
                key,
                value: Some("SN-1".to_string()),
            },
            &editor(),
        )
        .unwrap();
    assert_eq!(
        written,
        EngineCommandResult::LinkWritten {
            key,
            outcome: LinkOutcome::Created
        }
    );

    let updated = catalog
        .execute(
            EngineCommand::UpdateLink {
                key,
                value: Some("SN-2".to_string()),
            },
            &editor(),
        )
        .unwrap();
    assert_eq!(updated, EngineCommandResult::LinkUpdated { key });

    let reassigned = catalog
        .execute(
            EngineCommand::ReassignAssetModel {
                asset_id: site.asset,
                model_id: other_model,
            },
            &editor(),
        )
        .unwrap();
    assert_eq!(
        reassigned,
        EngineCommandResult::AssetReassigned {
            asset_id: site.asset,
            model_id: other_model,
            removed_links: vec![key],
        }
    );
}

#[test]
fn test_link_delete_and_purge_commands() {
    let mut catalog = new_catalog();
    let site = build_site(&mut catalog);
    let category = common::create(&mut catalog, NodeKind::Category, NodeDraft::named("Rotating"));
    let key = common::link(&mut catalog, AssociationKind::AssetCategory, site.asset, category);

    assert_eq!(
        catalog
            .execute(EngineCommand::MarkDeleteLink { key }, &editor())
            .unwrap(),
        EngineCommandResult::LinkDeleted { key }
    );
    assert_eq!(
        catalog
            .execute(EngineCommand::PurgeLink { key }, &editor())
            .unwrap(),
        EngineCommandResult::LinkPurged { key }
    );
}

#[test]
fn test_import_seed_command() {
    let mut catalog = new_catalog();
    let seed = parse_seed_str("schema_version: 0\nquestions:\n  - name: Wet floor?\n").unwrap();

    let result = catalog
        .execute(
            EngineCommand::ImportSeed {
                seed: Box::new(seed),
                source: Some("inline".to_string()),
            },
            &editor(),
        )
        .unwrap();

    let EngineCommandResult::SeedImported(summary) = result else {
        panic!("unexpected result {:?}", result);
    };
    assert_eq!(summary.node_count, 1);
    assert_eq!(summary.link_count, 0);
}

#[test]
fn test_command_errors_pass_through() {
    let mut catalog = new_catalog();
    let err = catalog
        .execute(
            EngineCommand::PurgeNode {
                kind: NodeKind::Plant,
                id: 1,
            },
            &editor(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("node_purge"));
}

#[test]
fn test_command_result_serializes_with_tag() {
    let result = EngineCommandResult::NodeCreated {
        kind: NodeKind::Plant,
        id: 3,
    };
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["result"], "node_created");
    assert_eq!(json["kind"], "plant");
    assert_eq!(json["id"], 3);
}
