// Integration tests for asset model reassignment

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use assetcat_core::errors::ExErrorKind;
use assetcat_core::model::{AssociationKey, AssociationKind, ListFilter, NodeDraft, NodeKind};
use assetcat_engine::commands::STORE_FAILURE_MESSAGE;
use common::{build_site, create, editor, link, new_catalog, Site};

/// Site plus one link of every model-dependent kind on the asset
fn linked_site(catalog: &mut assetcat_engine::Catalog) -> (Site, i64, Vec<AssociationKey>) {
    let site = build_site(catalog);
    let other_model = create(
        catalog,
        NodeKind::Model,
        NodeDraft::named("CP-300").under(site.device),
    );
    let category = create(catalog, NodeKind::Category, NodeDraft::named("Rotating"));
    let detail = create(catalog, NodeKind::Detail, NodeDraft::named("Serial"));
    let situation = create(catalog, NodeKind::Situation, NodeDraft::named("Leak"));
    let comm = create(catalog, NodeKind::Communicate, NodeDraft::named("Broadcast"));

    let detail_key = AssociationKey::new(AssociationKind::AssetDetail, site.asset, detail);
    catalog
        .add_or_reactivate(detail_key, Some("SN-1"), &editor())
        .unwrap();
    let keys = vec![
        link(catalog, AssociationKind::AssetCategory, site.asset, category),
        detail_key,
        link(catalog, AssociationKind::AssetSituation, site.asset, situation),
        link(catalog, AssociationKind::CommunicateAsset, comm, site.asset),
    ];
    (site, other_model, keys)
}

#[test]
fn test_reassign_removes_every_model_dependent_link() {
    // GIVEN an asset with links of all four dependent kinds, one soft-deleted
    let mut catalog = new_catalog();
    let (site, other_model, keys) = linked_site(&mut catalog);
    catalog.mark_delete_association(keys[2], &editor()).unwrap();

    // WHEN it moves to another model
    let removed = catalog
        .reassign_asset_model(site.asset, other_model, &editor())
        .unwrap();

    // THEN all four rows are gone and the asset points at the new model
    assert_eq!(removed.len(), 4);
    for key in &keys {
        assert!(removed.contains(key));
        assert_eq!(
            catalog.get_association(*key).unwrap_err().kind(),
            ExErrorKind::NotFound
        );
    }
    let asset = catalog.get_node(NodeKind::Asset, site.asset).unwrap();
    assert_eq!(asset.model_id, Some(other_model));
}

#[test]
fn test_reassign_leaves_other_assets_links_alone() {
    let mut catalog = new_catalog();
    let (site, other_model, _) = linked_site(&mut catalog);
    let sibling = create(
        &mut catalog,
        NodeKind::Asset,
        NodeDraft::named("Pump 8").under(site.coordinate).with_model(site.model),
    );
    let category = catalog.list_nodes(NodeKind::Category, ListFilter::active()).unwrap()[0].id;
    let kept = link(&mut catalog, AssociationKind::AssetCategory, sibling, category);

    catalog
        .reassign_asset_model(site.asset, other_model, &editor())
        .unwrap();

    assert!(!catalog.get_association(kept).unwrap().is_deleted);
}

#[test]
fn test_reassign_to_same_model_conflicts() {
    let mut catalog = new_catalog();
    let (site, _, keys) = linked_site(&mut catalog);

    let err = catalog
        .reassign_asset_model(site.asset, site.model, &editor())
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Conflict);
    for key in keys {
        assert!(catalog.get_association(key).is_ok());
    }
}

#[test]
fn test_reassign_rejects_bad_references() {
    let mut catalog = new_catalog();
    let (site, other_model, _) = linked_site(&mut catalog);

    let missing_asset = catalog
        .reassign_asset_model(999, other_model, &editor())
        .unwrap_err();
    assert_eq!(missing_asset.kind(), ExErrorKind::NotFound);

    let missing_model = catalog
        .reassign_asset_model(site.asset, 999, &editor())
        .unwrap_err();
    assert_eq!(missing_model.kind(), ExErrorKind::NotFound);

    catalog
        .mark_delete_node(NodeKind::Model, other_model, &editor())
        .unwrap();
    let deleted_model = catalog
        .reassign_asset_model(site.asset, other_model, &editor())
        .unwrap_err();
    assert_eq!(deleted_model.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_reassign_deleted_asset_conflicts() {
    let mut catalog = new_catalog();
    let site = build_site(&mut catalog);
    let other_model = create(
        &mut catalog,
        NodeKind::Model,
        NodeDraft::named("CP-300").under(site.device),
    );
    catalog
        .mark_delete_node(NodeKind::Asset, site.asset, &editor())
        .unwrap();

    let err = catalog
        .reassign_asset_model(site.asset, other_model, &editor())
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Conflict);
}

#[test]
fn test_reassign_is_atomic_on_store_failure() {
    // GIVEN a trigger that makes the final model update fail
    let mut catalog = new_catalog();
    let (site, other_model, keys) = linked_site(&mut catalog);
    catalog
        .connection()
        .execute_batch(
            "CREATE TEMP TRIGGER fail_model_update BEFORE UPDATE OF model_id ON asset
             BEGIN SELECT RAISE(ABORT, 'forced'); END;",
        )
        .unwrap();

    // WHEN the reassignment runs
    let err = catalog
        .reassign_asset_model(site.asset, other_model, &editor())
        .unwrap_err();

    // THEN the caller sees a generic store failure
    assert_eq!(err.kind(), ExErrorKind::StoreFailure);
    assert_eq!(err.message(), STORE_FAILURE_MESSAGE);
    assert!(!err.to_string().contains("forced"));

    // AND every link and the old model survive the rollback
    for key in keys {
        assert!(catalog.get_association(key).is_ok());
    }
    let asset = catalog.get_node(NodeKind::Asset, site.asset).unwrap();
    assert_eq!(asset.model_id, Some(site.model));
}
