//! Entity normalization
//!
//! One total function per entity type: every recognized field of the raw
//! record is mapped to a concrete string, with the sentinel standing in for
//! anything absent, and derived fields (CRS codes, browse URLs, joined list
//! displays) computed here so the rest of the engine never sees an `Option`.

use georeport_core::types::{
    Layer, LayerGroup, LayerStyleInfo, RawLayer, RawLayerGroup, RawStore, RawStyleRef,
    RawWorkspace, SENTINEL, Store, Style, Workspace, extract_crs, join_or_sentinel, or_sentinel,
};

/// Normalize a workspace record
#[must_use]
pub fn workspace(raw: RawWorkspace) -> Workspace {
    Workspace {
        name: raw.name,
        href: or_sentinel(raw.href),
    }
}

/// Normalize a store record, deriving its browse URL
#[must_use]
pub fn store(raw: RawStore, base_url: &str) -> Store {
    let workspace = or_sentinel(raw.workspace);
    let url = format!("{base_url}/workspaces/{workspace}/datastores/{}.html", raw.name);
    Store {
        workspace,
        name: raw.name,
        url,
    }
}

/// Normalize a layer group record, deriving its CRS from the bounds string
#[must_use]
pub fn layer_group(raw: RawLayerGroup) -> LayerGroup {
    let bounds = or_sentinel(raw.bounds);
    LayerGroup {
        workspace: or_sentinel(raw.workspace),
        name: raw.name,
        title: or_sentinel(raw.title),
        crs: extract_crs(&bounds),
        bounds,
        mode: or_sentinel(raw.mode),
        members_joined: join_or_sentinel(&raw.members),
        member_names: raw.members,
    }
}

/// Normalize a layer record together with its style lookup result and the
/// owning group resolved from the membership reverse index
#[must_use]
pub fn layer(raw: RawLayer, styles: LayerStyleInfo, owning_group: Option<&str>) -> Layer {
    let bbox = or_sentinel(raw.bbox);
    Layer {
        workspace: or_sentinel(raw.workspace),
        store: or_sentinel(raw.store),
        group: owning_group.map_or_else(|| SENTINEL.to_string(), ToString::to_string),
        name: raw.name,
        title: or_sentinel(raw.title),
        default_style: or_sentinel(styles.default_style),
        styles_joined: join_or_sentinel(&styles.available_styles),
        available_styles: styles.available_styles,
        crs: extract_crs(&bbox),
        bbox,
        abstract_: or_sentinel(raw.abstract_),
    }
}

/// Normalize a style record, deriving its document links
#[must_use]
pub fn style(raw: RawStyleRef, base_url: &str) -> Style {
    let name = or_sentinel(raw.name);
    Style {
        sld_link: format!("{base_url}/styles/{name}.sld"),
        html_link: format!("{base_url}/styles/{name}.html"),
        name,
    }
}
