//! End-to-end pipeline tests against an in-memory catalog

#![allow(missing_docs)]

use async_trait::async_trait;
use georeport_core::config::GeoreportConfig;
use georeport_core::error::{ReportError, Result};
use georeport_core::traits::CatalogSource;
use georeport_core::types::{
    LayerStyleInfo, MemberKind, RawLayer, RawLayerGroup, RawStore, RawStyleRef, RawWorkspace,
    SENTINEL,
};
use georeport_service::report::xref;
use georeport_service::run::{assemble_model, fetch_catalog, generate_report};
use pretty_assertions::assert_eq;

const BASE: &str = "http://gis.example.org/geoserver/rest";

/// Catalog fixture for the ws1/st1/g1 scenario: group `g1` contains layers
/// `L1` and `L2`, `L1` has default style `s1`, and `L2`'s style lookup
/// fails. Optional failure toggles exercise the degradation policy.
#[derive(Default)]
struct FixtureCatalog {
    fail_workspaces: bool,
    fail_styles_listing: bool,
}

#[async_trait]
impl CatalogSource for FixtureCatalog {
    async fn list_workspaces(&self) -> Result<Vec<RawWorkspace>> {
        if self.fail_workspaces {
            return Err(ReportError::catalog("connection refused"));
        }
        Ok(vec![RawWorkspace {
            name: "ws1".to_string(),
            href: Some(format!("{BASE}/workspaces/ws1.json")),
        }])
    }

    async fn list_stores(&self) -> Result<Vec<RawStore>> {
        Ok(vec![RawStore {
            workspace: Some("ws1".to_string()),
            name: "st1".to_string(),
        }])
    }

    async fn list_layergroups(&self) -> Result<Vec<RawLayerGroup>> {
        Ok(vec![RawLayerGroup {
            workspace: Some("ws1".to_string()),
            name: "g1".to_string(),
            title: Some("Group one".to_string()),
            bounds: Some("minx=-180 miny=-90 maxx=180 maxy=90 EPSG:4326".to_string()),
            mode: Some("SINGLE".to_string()),
            members: vec!["L1".to_string(), "L2".to_string()],
        }])
    }

    async fn list_layers(&self) -> Result<Vec<RawLayer>> {
        Ok(vec![
            RawLayer {
                workspace: Some("ws1".to_string()),
                store: Some("st1".to_string()),
                name: "L1".to_string(),
                title: Some("Layer one".to_string()),
                bbox: Some("minx=41 miny=55 maxx=42 maxy=56 EPSG:4326".to_string()),
                abstract_: None,
            },
            RawLayer {
                workspace: Some("ws1".to_string()),
                store: Some("st1".to_string()),
                name: "L2".to_string(),
                title: Some("Layer two".to_string()),
                bbox: None,
                abstract_: Some("Second layer".to_string()),
            },
        ])
    }

    async fn get_layer_style_info(&self, layer_name: &str) -> Result<LayerStyleInfo> {
        match layer_name {
            "L1" => Ok(LayerStyleInfo {
                default_style: Some("s1".to_string()),
                available_styles: vec!["s1".to_string(), "night".to_string()],
            }),
            // A single failing style lookup must not abort the run
            _ => Err(ReportError::catalog_at("500 Internal Server Error", "/layers/L2.json")),
        }
    }

    async fn list_styles(&self) -> Result<Vec<RawStyleRef>> {
        if self.fail_styles_listing {
            return Err(ReportError::catalog("styles listing unavailable"));
        }
        Ok(vec![RawStyleRef {
            name: Some("s1".to_string()),
        }])
    }
}

#[tokio::test]
async fn model_assembled_from_catalog() -> Result<()> {
    let snapshot = fetch_catalog(&FixtureCatalog::default()).await?;
    let model = assemble_model(snapshot, BASE);

    assert_eq!(model.workspaces.len(), 1);
    assert_eq!(model.stores.len(), 1);
    let store = &model.stores[0];
    assert_eq!(store.workspace, "ws1");
    assert_eq!(store.name, "st1");
    assert_eq!(store.url, format!("{BASE}/workspaces/ws1/datastores/st1.html"));

    // Both layers resolve g1 as their owning group
    assert_eq!(model.layers.len(), 2);
    for layer in &model.layers {
        assert_eq!(layer.group, "g1");
    }
    let l1 = &model.layers[0];
    assert_eq!(l1.name, "L1");
    assert_eq!(l1.default_style, "s1");
    assert_eq!(l1.styles_joined, "s1, night");
    assert_eq!(l1.crs, "EPSG:4326");

    // L2's failed style lookup degrades to sentinel fields only
    let l2 = &model.layers[1];
    assert_eq!(l2.default_style, SENTINEL);
    assert_eq!(l2.styles_joined, SENTINEL);
    assert_eq!(l2.bbox, SENTINEL);
    assert_eq!(l2.crs, SENTINEL);
    assert_eq!(l2.abstract_, "Second layer");

    // Group sub-sheet: two rows, both classified as layers
    assert_eq!(model.group_sheets.len(), 1);
    let sheet = &model.group_sheets[0];
    assert_eq!(sheet.rows.len(), 2);
    for row in &sheet.rows {
        assert_eq!(row.member_kind, MemberKind::Layer);
        assert_eq!(row.group_title, "Group one");
    }
    assert_eq!(sheet.rows[0].member_name, "L1");
    assert_eq!(sheet.rows[0].style, "s1");
    assert_eq!(sheet.rows[1].style, SENTINEL);

    Ok(())
}

#[tokio::test]
async fn artifact_written_with_timestamped_name() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = GeoreportConfig::default();
    config.catalog.base_url = BASE.to_string();
    config.report.output_dir = dir.path().to_path_buf();

    let path = generate_report(&FixtureCatalog::default(), &config).await?;

    assert!(path.exists());
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("geoserver_report_"));
    assert!(name.ends_with(".xlsx"));
    assert!(path.metadata()?.len() > 0);
    Ok(())
}

#[tokio::test]
async fn styles_listing_failure_degrades_report() -> Result<()> {
    let catalog = FixtureCatalog {
        fail_styles_listing: true,
        ..FixtureCatalog::default()
    };
    let snapshot = fetch_catalog(&catalog).await?;
    let model = assemble_model(snapshot, BASE);

    // The styles collection is empty but the rest of the report survives
    assert!(model.styles.is_empty());
    assert_eq!(model.layers.len(), 2);

    // And nothing links to the now-empty Styles sheet rows
    let links = xref::resolve(&model, 25);
    assert_eq!(links.get("Layers", 1, 5), None);
    Ok(())
}

#[tokio::test]
async fn unreachable_catalog_aborts_before_writing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = GeoreportConfig::default();
    config.report.output_dir = dir.path().to_path_buf();

    let catalog = FixtureCatalog {
        fail_workspaces: true,
        ..FixtureCatalog::default()
    };
    let result = generate_report(&catalog, &config).await;

    assert!(matches!(result, Err(ReportError::Catalog { .. })));
    // No partial artifact is left behind
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
