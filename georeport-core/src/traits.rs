//! Core trait definitions for catalog access

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    LayerStyleInfo, RawLayer, RawLayerGroup, RawStore, RawStyleRef, RawWorkspace,
};

/// Read-only view of a geospatial catalog server.
///
/// The report engine consumes this trait only; the REST adapter and the
/// in-memory test fixtures both implement it. Implementations are expected to
/// surface transport failures as errors and leave degradation policy (empty
/// collections, sentinel fields) to the caller.
///
/// The trait is dyn-compatible and can be used as `&dyn CatalogSource`.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// List all workspaces
    async fn list_workspaces(&self) -> Result<Vec<RawWorkspace>>;

    /// List all data stores across workspaces
    async fn list_stores(&self) -> Result<Vec<RawStore>>;

    /// List all layer groups with their ordered member names
    async fn list_layergroups(&self) -> Result<Vec<RawLayerGroup>>;

    /// List all layers
    async fn list_layers(&self) -> Result<Vec<RawLayer>>;

    /// Fetch the default and available styles for one layer
    async fn get_layer_style_info(&self, layer_name: &str) -> Result<LayerStyleInfo>;

    /// List all styles
    async fn list_styles(&self) -> Result<Vec<RawStyleRef>>;
}
