//! Single-pass report generation pipeline
//!
//! Three strictly ordered phases: fetch (sequential awaited catalog calls),
//! build (pure model assembly plus cross-reference resolution), render
//! (artifact written once). The fetch phase owns the degradation policy: the
//! opening workspace listing doubles as the reachability probe and its
//! failure aborts the run, while every later collection failure degrades to
//! an empty set and a per-layer style lookup failure degrades to sentinel
//! fields on that layer alone.

use chrono::Local;
use georeport_core::config::GeoreportConfig;
use georeport_core::error::Result;
use georeport_core::traits::CatalogSource;
use georeport_core::types::{
    LayerStyleInfo, RawLayer, RawLayerGroup, RawStore, RawStyleRef, RawWorkspace,
};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::generator::excel::ExcelRenderer;
use crate::report::model::ReportModel;
use crate::report::{associations, model, normalize, xref};

/// Raw catalog collections captured by the fetch phase
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    /// Workspaces in fetch order
    pub workspaces: Vec<RawWorkspace>,
    /// Stores in fetch order
    pub stores: Vec<RawStore>,
    /// Layer groups in fetch order
    pub groups: Vec<RawLayerGroup>,
    /// Layers in fetch order
    pub layers: Vec<RawLayer>,
    /// Style lookup results, parallel to `layers`
    pub layer_styles: Vec<LayerStyleInfo>,
    /// Styles in fetch order
    pub styles: Vec<RawStyleRef>,
}

/// Fetch every catalog collection, applying the degradation policy.
///
/// # Errors
///
/// Returns an error only when the catalog is unreachable, signalled by the
/// opening workspace listing failing.
pub async fn fetch_catalog<C>(catalog: &C) -> Result<CatalogSnapshot>
where
    C: CatalogSource + ?Sized,
{
    let workspaces = catalog.list_workspaces().await?;
    info!(count = workspaces.len(), "workspaces fetched");

    let stores = degrade("stores", catalog.list_stores().await);
    let groups = degrade("layer groups", catalog.list_layergroups().await);
    let layers = degrade("layers", catalog.list_layers().await);

    let mut layer_styles = Vec::with_capacity(layers.len());
    for layer in &layers {
        let styles = match catalog.get_layer_style_info(&layer.name).await {
            Ok(styles) => styles,
            Err(e) => {
                debug!(layer = %layer.name, error = %e,
                       "style lookup failed; style fields degrade to sentinel");
                LayerStyleInfo::default()
            }
        };
        layer_styles.push(styles);
    }

    let styles = degrade("styles", catalog.list_styles().await);

    Ok(CatalogSnapshot {
        workspaces,
        stores,
        groups,
        layers,
        layer_styles,
        styles,
    })
}

fn degrade<T>(collection: &str, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => {
            info!(count = items.len(), collection, "collection fetched");
            items
        }
        Err(e) => {
            warn!(collection, error = %e, "collection unavailable; report degrades to empty set");
            Vec::new()
        }
    }
}

/// Normalize the snapshot, resolve associations and build the ordered model.
///
/// Pure function of the snapshot; `base_url` feeds the derived store and
/// style links.
#[must_use]
pub fn assemble_model(snapshot: CatalogSnapshot, base_url: &str) -> ReportModel {
    let assoc = {
        let layer_names: HashSet<&str> =
            snapshot.layers.iter().map(|l| l.name.as_str()).collect();
        associations::resolve(&snapshot.groups, &layer_names)
    };

    let workspaces = snapshot
        .workspaces
        .into_iter()
        .map(normalize::workspace)
        .collect();
    let stores = snapshot
        .stores
        .into_iter()
        .map(|raw| normalize::store(raw, base_url))
        .collect();
    let groups = snapshot
        .groups
        .into_iter()
        .map(normalize::layer_group)
        .collect();
    let layers = snapshot
        .layers
        .into_iter()
        .zip(snapshot.layer_styles)
        .map(|(raw, styles)| {
            let owner = assoc.owner_of(&raw.name);
            normalize::layer(raw, styles, owner)
        })
        .collect();
    let styles = snapshot
        .styles
        .into_iter()
        .map(|raw| normalize::style(raw, base_url))
        .collect();

    model::build(workspaces, stores, groups, layers, styles, &assoc)
}

/// Run the whole pipeline and write the artifact.
///
/// Returns the path of the written file, which carries the generation
/// timestamp.
///
/// # Errors
///
/// Returns an error when the catalog is unreachable or the artifact cannot
/// be rendered or written; partial data loss degrades the report instead.
pub async fn generate_report<C>(catalog: &C, config: &GeoreportConfig) -> Result<PathBuf>
where
    C: CatalogSource + ?Sized,
{
    let snapshot = fetch_catalog(catalog).await?;
    let report = assemble_model(snapshot, config.catalog.base_url_trimmed());
    info!(
        workspaces = report.workspaces.len(),
        stores = report.stores.len(),
        groups = report.groups.len(),
        layers = report.layers.len(),
        styles = report.styles.len(),
        "report model assembled"
    );

    let links = xref::resolve(&report, config.report.sheet_title_limit);
    info!(annotations = links.len(), "cross-references resolved");

    let path = config.report.artifact_path(Local::now());
    ExcelRenderer::new(&config.report).write_artifact(&report, &links, &path)?;
    Ok(path)
}
