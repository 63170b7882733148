//! Decoding of catalog REST response bodies into raw records
//!
//! GeoServer's JSON REST responses are irregular: list payloads are wrapped
//! twice (`{"workspaces": {"workspace": [...]}}`), a single-element list may
//! be returned as a bare object, an empty list as an empty string, and CRS
//! values appear either as plain strings or as `{"@class": .., "$": ..}`
//! objects. This module normalizes all of that into the raw record types; it
//! performs no network access.

use georeport_core::types::{
    LayerStyleInfo, RawLayer, RawLayerGroup, RawStore, RawStyleRef, RawWorkspace,
};
use serde_json::Value;

/// Collect the entries of a doubly-wrapped list payload.
///
/// Accepts an array, a bare single object, or anything else (treated as
/// empty, covering GeoServer's `""` placeholder for empty collections).
fn nested_list<'a>(body: &'a Value, outer: &str, inner: &str) -> Vec<&'a Value> {
    match body.get(outer).and_then(|v| v.get(inner)) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(obj @ Value::Object(_)) => vec![obj],
        _ => Vec::new(),
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

fn num_display(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// CRS values appear as `"EPSG:4326"` or as `{"@class": "projected", "$": "EPSG:32633"}`.
fn crs_display(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => str_field(value, "$"),
        _ => None,
    }
}

/// Render a bounds object as a single display string carrying the CRS token.
fn bounds_display(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    let mut parts = Vec::new();
    for key in ["minx", "miny", "maxx", "maxy"] {
        if let Some(n) = obj.get(key).and_then(num_display) {
            parts.push(format!("{key}={n}"));
        }
    }
    if let Some(crs) = obj.get("crs").and_then(crs_display) {
        parts.push(crs);
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Decode a `/workspaces.json` body
pub fn workspaces(body: &Value) -> Vec<RawWorkspace> {
    nested_list(body, "workspaces", "workspace")
        .into_iter()
        .filter_map(|entry| {
            Some(RawWorkspace {
                name: str_field(entry, "name")?,
                href: str_field(entry, "href"),
            })
        })
        .collect()
}

/// Decode a store listing body for one workspace.
///
/// The wrapper keys differ per store flavor (`dataStores`/`dataStore`,
/// `coverageStores`/`coverageStore`), so the caller names them.
pub fn stores(body: &Value, workspace: &str, outer: &str, inner: &str) -> Vec<RawStore> {
    nested_list(body, outer, inner)
        .into_iter()
        .filter_map(|entry| {
            Some(RawStore {
                workspace: Some(workspace.to_string()),
                name: str_field(entry, "name")?,
            })
        })
        .collect()
}

/// Decode the group names from a `/layergroups.json` body
pub fn group_names(body: &Value) -> Vec<String> {
    nested_list(body, "layerGroups", "layerGroup")
        .into_iter()
        .filter_map(|entry| str_field(entry, "name"))
        .collect()
}

/// Decode a `/layergroups/{name}.json` body
pub fn group_detail(body: &Value) -> Option<RawLayerGroup> {
    let group = body.get("layerGroup")?;
    let members = nested_list(group, "publishables", "published")
        .into_iter()
        .chain(nested_list(group, "layers", "layer"))
        .filter_map(|entry| str_field(entry, "name"))
        .collect();

    Some(RawLayerGroup {
        workspace: group.get("workspace").and_then(|ws| str_field(ws, "name")),
        name: str_field(group, "name")?,
        title: str_field(group, "title"),
        bounds: group.get("bounds").and_then(bounds_display),
        mode: str_field(group, "mode"),
        members,
    })
}

/// Decode the layer names from a `/layers.json` body
pub fn layer_names(body: &Value) -> Vec<String> {
    nested_list(body, "layers", "layer")
        .into_iter()
        .filter_map(|entry| str_field(entry, "name"))
        .collect()
}

/// Extract the resource href from a `/layers/{name}.json` body
pub fn layer_resource_href(body: &Value) -> Option<String> {
    body.get("layer")
        .and_then(|layer| layer.get("resource"))
        .and_then(|resource| str_field(resource, "href"))
}

/// Decode the style fields of a `/layers/{name}.json` body
pub fn style_info(body: &Value) -> LayerStyleInfo {
    let layer = body.get("layer");
    let default_style = layer
        .and_then(|l| l.get("defaultStyle"))
        .and_then(|style| str_field(style, "name"));
    let available_styles = layer
        .map(|l| nested_list(l, "styles", "style"))
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| str_field(entry, "name"))
        .collect();

    LayerStyleInfo {
        default_style,
        available_styles,
    }
}

/// Assemble a raw layer record from its listing name and resource detail.
///
/// The resource body is the featuretype/coverage document behind the layer's
/// `resource.href`; its outer key varies by resource class, so the first
/// object value is taken. A missing resource body yields a record with only
/// the name populated.
pub fn layer_detail(name: &str, resource_body: Option<&Value>) -> RawLayer {
    let resource = resource_body
        .and_then(Value::as_object)
        .and_then(|obj| obj.values().next());

    let Some(resource) = resource else {
        return RawLayer {
            name: name.to_string(),
            ..RawLayer::default()
        };
    };

    // The store name is workspace-qualified ("ws:store")
    let store_field = resource.get("store").and_then(|s| str_field(s, "name"));
    let (store_workspace, store_name) = match store_field {
        Some(qualified) => match qualified.split_once(':') {
            Some((ws, store)) => (Some(ws.to_string()), Some(store.to_string())),
            None => (None, Some(qualified)),
        },
        None => (None, None),
    };
    let workspace = resource
        .get("namespace")
        .and_then(|ns| str_field(ns, "name"))
        .or(store_workspace);

    RawLayer {
        workspace,
        store: store_name,
        name: name.to_string(),
        title: str_field(resource, "title"),
        bbox: resource.get("latLonBoundingBox").and_then(bounds_display),
        abstract_: str_field(resource, "abstract"),
    }
}

/// Decode a `/styles.json` body
pub fn styles(body: &Value) -> Vec<RawStyleRef> {
    nested_list(body, "styles", "style")
        .into_iter()
        .map(|entry| RawStyleRef {
            name: str_field(entry, "name"),
        })
        .collect()
}
