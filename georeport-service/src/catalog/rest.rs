//! REST adapter for GeoServer-style catalogs

use async_trait::async_trait;
use georeport_core::config::CatalogConfig;
use georeport_core::error::{ReportError, Result};
use georeport_core::traits::CatalogSource;
use georeport_core::types::{
    LayerStyleInfo, RawLayer, RawLayerGroup, RawStore, RawStyleRef, RawWorkspace,
};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::records;

/// Catalog adapter speaking the GeoServer REST JSON dialect.
///
/// All calls are sequential and awaited to completion; the adapter holds no
/// state beyond the connection parameters and performs no retries. Transport
/// and decode failures surface as [`ReportError::Catalog`]; degradation
/// policy belongs to the caller.
pub struct RestCatalog {
    base_url: String,
    username: String,
    password: String,
    client: Client,
}

impl RestCatalog {
    /// Create a new adapter from connection configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the base URL is invalid or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        config.parsed_base_url()?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ReportError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url_trimmed().to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            client,
        })
    }

    /// GET a JSON document from a path under the base URL
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        self.get_json_absolute(&url).await
    }

    /// GET a JSON document from an absolute URL
    async fn get_json_absolute(&self, url: &str) -> Result<Value> {
        debug!(%url, "catalog request");
        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| ReportError::catalog_at(e.to_string(), url))?
            .error_for_status()
            .map_err(|e| ReportError::catalog_at(e.to_string(), url))?;

        response
            .json()
            .await
            .map_err(|e| ReportError::catalog_at(format!("invalid JSON body: {e}"), url))
    }
}

#[async_trait]
impl CatalogSource for RestCatalog {
    async fn list_workspaces(&self) -> Result<Vec<RawWorkspace>> {
        let body = self.get_json("/workspaces.json").await?;
        Ok(records::workspaces(&body))
    }

    async fn list_stores(&self) -> Result<Vec<RawStore>> {
        let workspaces = self.list_workspaces().await?;
        let mut stores = Vec::new();
        for workspace in &workspaces {
            for (path, outer, inner) in [
                ("datastores.json", "dataStores", "dataStore"),
                ("coveragestores.json", "coverageStores", "coverageStore"),
            ] {
                let url = format!("/workspaces/{}/{path}", workspace.name);
                match self.get_json(&url).await {
                    Ok(body) => {
                        stores.extend(records::stores(&body, &workspace.name, outer, inner));
                    }
                    Err(e) => {
                        warn!(workspace = %workspace.name, error = %e,
                              "skipping unreadable store listing");
                    }
                }
            }
        }
        Ok(stores)
    }

    async fn list_layergroups(&self) -> Result<Vec<RawLayerGroup>> {
        let body = self.get_json("/layergroups.json").await?;
        let mut groups = Vec::new();
        for name in records::group_names(&body) {
            let detail = self.get_json(&format!("/layergroups/{name}.json")).await?;
            match records::group_detail(&detail) {
                Some(group) => groups.push(group),
                None => warn!(group = %name, "layer group detail has no usable body"),
            }
        }
        Ok(groups)
    }

    async fn list_layers(&self) -> Result<Vec<RawLayer>> {
        let body = self.get_json("/layers.json").await?;
        let mut layers = Vec::new();
        for name in records::layer_names(&body) {
            let detail = self.get_json(&format!("/layers/{name}.json")).await?;
            // The resource document carries title, abstract, bbox and store;
            // losing it degrades those fields, not the layer row.
            let resource = match records::layer_resource_href(&detail) {
                Some(href) => match self.get_json_absolute(&href).await {
                    Ok(body) => Some(body),
                    Err(e) => {
                        debug!(layer = %name, error = %e, "layer resource unavailable");
                        None
                    }
                },
                None => None,
            };
            layers.push(records::layer_detail(&name, resource.as_ref()));
        }
        Ok(layers)
    }

    async fn get_layer_style_info(&self, layer_name: &str) -> Result<LayerStyleInfo> {
        let body = self.get_json(&format!("/layers/{layer_name}.json")).await?;
        Ok(records::style_info(&body))
    }

    async fn list_styles(&self) -> Result<Vec<RawStyleRef>> {
        let body = self.get_json("/styles.json").await?;
        Ok(records::styles(&body))
    }
}
