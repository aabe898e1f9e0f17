use assetcat_core::model::{AssociationKey, AssociationKind, NodeDraft, NodeKind};
use assetcat_core_types::EditorId;
use assetcat_engine::Catalog;

#[allow(dead_code)]
pub fn editor() -> EditorId {
    EditorId::new("tester")
}

#[allow(dead_code)]
pub fn new_catalog() -> Catalog {
    Catalog::open_in_memory().expect("in-memory catalog")
}

/// Create a node, panicking on failure (test setup only)
#[allow(dead_code)]
pub fn create(catalog: &mut Catalog, kind: NodeKind, draft: NodeDraft) -> i64 {
    catalog
        .create_node(kind, draft, &editor())
        .unwrap_or_else(|e| panic!("create {} failed: {}", kind, e))
}

#[allow(dead_code)]
pub fn link(catalog: &mut Catalog, kind: AssociationKind, left: i64, right: i64) -> AssociationKey {
    let key = AssociationKey::new(kind, left, right);
    catalog
        .add_or_reactivate(key, None, &editor())
        .unwrap_or_else(|e| panic!("link {} failed: {}", key, e));
    key
}

/// Ids of one full chain Plant → Area → Space → Coordinate → Asset, with
/// the asset on a model of its own device
#[allow(dead_code)]
pub struct Site {
    pub plant: i64,
    pub area: i64,
    pub space: i64,
    pub coordinate: i64,
    pub device: i64,
    pub model: i64,
    pub asset: i64,
}

#[allow(dead_code)]
pub fn build_site(catalog: &mut Catalog) -> Site {
    let plant = create(catalog, NodeKind::Plant, NodeDraft::named("North Plant"));
    let area = create(catalog, NodeKind::Area, NodeDraft::named("Boiler House").under(plant));
    let space = create(catalog, NodeKind::Space, NodeDraft::named("Level 1").under(area));
    let coordinate = create(catalog, NodeKind::Coordinate, NodeDraft::named("B1-01").under(space));
    let device = create(catalog, NodeKind::Device, NodeDraft::named("Centrifugal Pumps"));
    let model = create(catalog, NodeKind::Model, NodeDraft::named("CP-200").under(device));
    let asset = create(
        catalog,
        NodeKind::Asset,
        NodeDraft::named("Pump 7").under(coordinate).with_model(model),
    );
    Site {
        plant,
        area,
        space,
        coordinate,
        device,
        model,
        asset,
    }
}
