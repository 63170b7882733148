//! Record and entity types for the catalog report model
//!
//! Two layers of types live here. *Raw records* are what a [`crate::traits::CatalogSource`]
//! hands back: every non-key attribute is optional because the catalog may omit it.
//! *Canonical entities* are the fully-populated rows the report is built from: every
//! attribute is a concrete string, with [`SENTINEL`] standing in for anything the
//! catalog did not provide.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder rendered for every absent or unresolvable attribute.
///
/// Normalization never produces an empty string or drops a column; a gap in the
/// source data always surfaces as this exact value so it can be highlighted in
/// the rendered artifact.
pub const SENTINEL: &str = "N/A";

static CRS_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"EPSG:\d+").expect("CRS token pattern is valid"));

/// Extract a coordinate-reference-system code from free-form bounds text.
///
/// Matches the first occurrence of `EPSG:` followed by digits. Returns
/// [`SENTINEL`] when no token is present.
#[must_use]
pub fn extract_crs(text: &str) -> String {
    CRS_TOKEN
        .find(text)
        .map_or_else(|| SENTINEL.to_string(), |m| m.as_str().to_string())
}

/// Substitute the sentinel for an absent attribute.
#[must_use]
pub fn or_sentinel(value: Option<String>) -> String {
    value.unwrap_or_else(|| SENTINEL.to_string())
}

/// Join an ordered list attribute for tabular display.
///
/// An empty list renders as the sentinel, matching the treatment of scalar
/// attributes that are absent altogether.
#[must_use]
pub fn join_or_sentinel(values: &[String]) -> String {
    if values.is_empty() {
        SENTINEL.to_string()
    } else {
        values.join(", ")
    }
}

// ---------------------------------------------------------------------------
// Raw catalog records
// ---------------------------------------------------------------------------

/// Workspace record as returned by the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWorkspace {
    /// Workspace name (unique key)
    pub name: String,
    /// REST href of the workspace, if reported
    pub href: Option<String>,
}

/// Data store record as returned by the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStore {
    /// Owning workspace name
    pub workspace: Option<String>,
    /// Store name (unique within its workspace)
    pub name: String,
}

/// Layer group record as returned by the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLayerGroup {
    /// Owning workspace name, absent for global groups
    pub workspace: Option<String>,
    /// Group name (unique key)
    pub name: String,
    /// Human-readable title
    pub title: Option<String>,
    /// Bounds string, usually carrying an `EPSG:` token
    pub bounds: Option<String>,
    /// Group mode (`SINGLE`, `NAMED`, ...)
    pub mode: Option<String>,
    /// Ordered member names: layers and/or nested group names
    #[serde(default)]
    pub members: Vec<String>,
}

/// Layer record as returned by the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLayer {
    /// Owning workspace name
    pub workspace: Option<String>,
    /// Backing store name
    pub store: Option<String>,
    /// Layer name (unique key)
    pub name: String,
    /// Human-readable title
    pub title: Option<String>,
    /// Lat/lon bounding box string, usually carrying an `EPSG:` token
    pub bbox: Option<String>,
    /// Free-form abstract
    #[serde(rename = "abstract")]
    pub abstract_: Option<String>,
}

/// Per-layer style lookup result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerStyleInfo {
    /// Default style name
    pub default_style: Option<String>,
    /// Additional styles published for the layer, in catalog order
    #[serde(default)]
    pub available_styles: Vec<String>,
}

/// Style record as returned by the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStyleRef {
    /// Style name
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Canonical entities
// ---------------------------------------------------------------------------

/// Canonical workspace row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Workspace name (unique key)
    pub name: String,
    /// REST href or sentinel
    pub href: String,
}

/// Canonical data store row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    /// Owning workspace name or sentinel
    pub workspace: String,
    /// Store name
    pub name: String,
    /// Derived browse URL for the store
    pub url: String,
}

/// Canonical layer group row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerGroup {
    /// Owning workspace name or sentinel
    pub workspace: String,
    /// Group name (unique key)
    pub name: String,
    /// Title or sentinel
    pub title: String,
    /// CRS code derived from the bounds string, or sentinel
    pub crs: String,
    /// Raw bounds string or sentinel
    pub bounds: String,
    /// Group mode or sentinel
    pub mode: String,
    /// Ordered member names retained for programmatic lookups
    pub member_names: Vec<String>,
    /// Comma-joined member names for tabular display
    pub members_joined: String,
}

/// Canonical layer row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Owning workspace name or sentinel
    pub workspace: String,
    /// Backing store name or sentinel
    pub store: String,
    /// Owning group name resolved via the membership reverse index, or sentinel
    pub group: String,
    /// Layer name (unique key)
    pub name: String,
    /// Title or sentinel
    pub title: String,
    /// Default style name or sentinel
    pub default_style: String,
    /// Available style names retained for programmatic lookups
    pub available_styles: Vec<String>,
    /// Comma-joined available styles for tabular display
    pub styles_joined: String,
    /// CRS code derived from the bounding box, or sentinel
    pub crs: String,
    /// Raw bounding box string or sentinel
    pub bbox: String,
    /// Abstract or sentinel
    pub abstract_: String,
}

/// Canonical style row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Style name (unique key)
    pub name: String,
    /// Derived link to the SLD document
    pub sld_link: String,
    /// Derived link to the HTML view
    pub html_link: String,
}

// ---------------------------------------------------------------------------
// Group membership
// ---------------------------------------------------------------------------

/// Classification of a raw group member name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// The member name matched a known layer
    Layer,
    /// The member name matched no layer and is treated as a nested group
    /// reference, whether or not such a group exists
    Group,
}

impl MemberKind {
    /// Display label used in the member-type column
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Layer => "Layer",
            Self::Group => "Layer Group",
        }
    }
}

/// One resolved membership row of a layer group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMemberRow {
    /// Classification of the member name
    pub kind: MemberKind,
    /// The raw member name as listed by the group
    pub name: String,
}
