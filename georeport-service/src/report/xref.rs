//! Cross-reference resolution
//!
//! Runs strictly after the report model is final, because destination row
//! positions are only stable once every sheet's row order is fixed. Builds
//! lookup tables from entity keys to destination addresses, then annotates
//! the key-bearing cells of every sheet. Annotations are presentation
//! metadata only; no entity field is touched.

use georeport_core::types::MemberKind;
use std::collections::HashMap;

use super::model::{
    ReportModel, SHEET_LAYER_GROUPS, SHEET_LAYERS, SHEET_STORES, SHEET_STYLES, SHEET_WORKSPACES,
    group_sheet_title,
};

/// Destination of a resolved cross-reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Another cell in this workbook
    Internal {
        /// Destination sheet title
        sheet: String,
        /// Destination cell in A1 notation
        cell: String,
    },
    /// An external URL
    External(String),
}

/// Cell annotations for the whole workbook, keyed by
/// `(sheet title, worksheet row, worksheet column)` in 0-based sink
/// coordinates (row 0 is the header row).
#[derive(Debug, Default)]
pub struct LinkSet {
    links: HashMap<(String, u32, u16), LinkTarget>,
}

impl LinkSet {
    fn insert(&mut self, sheet: &str, row: u32, col: u16, target: LinkTarget) {
        self.links.insert((sheet.to_string(), row, col), target);
    }

    /// Annotation for one cell, if any
    #[must_use]
    pub fn get(&self, sheet: &str, row: u32, col: u16) -> Option<&LinkTarget> {
        self.links.get(&(sheet.to_string(), row, col))
    }

    /// Number of annotated cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no cell is annotated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Worksheet row of data row `idx`: one below the header row
fn data_row(idx: usize) -> u32 {
    u32::try_from(idx).map_or(u32::MAX, |i| i.saturating_add(1))
}

/// A1 cell name for 0-based sink coordinates
fn cell_name(row: u32, col: u16) -> String {
    let mut letters = String::new();
    let mut remainder = u32::from(col);
    loop {
        letters.insert(0, char::from(b'A' + u8::try_from(remainder % 26).unwrap_or(0)));
        if remainder < 26 {
            break;
        }
        remainder = remainder / 26 - 1;
    }
    format!("{letters}{}", row + 1)
}

fn internal(sheet: &str, row: u32, col: u16) -> LinkTarget {
    LinkTarget::Internal {
        sheet: sheet.to_string(),
        cell: cell_name(row, col),
    }
}

/// Key → destination address, built per linkable entity type
struct Lookups<'a> {
    workspace: HashMap<&'a str, u32>,
    store: HashMap<&'a str, u32>,
    group: HashMap<&'a str, u32>,
    layer: HashMap<&'a str, u32>,
    style: HashMap<&'a str, u32>,
}

impl<'a> Lookups<'a> {
    /// Destination rows are 0-based worksheet rows: data row `i` sits below
    /// the header at worksheet row `i + 1`.
    fn build(model: &'a ReportModel) -> Self {
        Self {
            workspace: keyed(model.workspaces.iter().map(|ws| ws.name.as_str())),
            store: keyed(model.stores.iter().map(|st| st.name.as_str())),
            group: keyed(model.groups.iter().map(|g| g.name.as_str())),
            layer: keyed(model.layers.iter().map(|l| l.name.as_str())),
            style: keyed(model.styles.iter().map(|s| s.name.as_str())),
        }
    }
}

fn keyed<'a>(names: impl Iterator<Item = &'a str>) -> HashMap<&'a str, u32> {
    names
        .enumerate()
        .map(|(idx, name)| (name, data_row(idx)))
        .collect()
}

/// Resolve all cross-references of a finalized model.
///
/// `title_limit` must match the limit the renderer uses for group sub-sheet
/// titles, so internal addresses land on the sheets that will exist.
#[must_use]
pub fn resolve(model: &ReportModel, title_limit: usize) -> LinkSet {
    let lookups = Lookups::build(model);
    let mut links = LinkSet::default();

    annotate_stores(model, &lookups, &mut links);
    annotate_layer_groups(model, title_limit, &mut links);
    annotate_layers(model, &lookups, &mut links);
    annotate_styles(model, &mut links);
    annotate_group_sheets(model, title_limit, &lookups, &mut links);

    links
}

/// Stores sheet: workspace column links back to the Workspaces sheet.
fn annotate_stores(model: &ReportModel, lookups: &Lookups<'_>, links: &mut LinkSet) {
    for (idx, store) in model.stores.iter().enumerate() {
        let row = data_row(idx);
        if let Some(&dest) = lookups.workspace.get(store.workspace.as_str()) {
            links.insert(SHEET_STORES, row, 0, internal(SHEET_WORKSPACES, dest, 0));
        }
    }
}

/// Layer Groups sheet: each group name jumps to its own sub-sheet, and the
/// member-list header jumps to the Layers sheet.
fn annotate_layer_groups(model: &ReportModel, title_limit: usize, links: &mut LinkSet) {
    links.insert(SHEET_LAYER_GROUPS, 0, 5, internal(SHEET_LAYERS, 0, 0));
    for (idx, group) in model.groups.iter().enumerate() {
        let row = data_row(idx);
        let sub_sheet = group_sheet_title(&group.name, title_limit);
        links.insert(SHEET_LAYER_GROUPS, row, 0, internal(&sub_sheet, 0, 0));
    }
}

/// Layers sheet: header row links to the master sheets; data cells link per
/// column to the workspace, store, group and style destinations.
fn annotate_layers(model: &ReportModel, lookups: &Lookups<'_>, links: &mut LinkSet) {
    links.insert(SHEET_LAYERS, 0, 0, internal(SHEET_WORKSPACES, 0, 0));
    links.insert(SHEET_LAYERS, 0, 1, internal(SHEET_STORES, 0, 0));
    links.insert(SHEET_LAYERS, 0, 2, internal(SHEET_LAYER_GROUPS, 0, 0));
    links.insert(SHEET_LAYERS, 0, 5, internal(SHEET_STYLES, 0, 0));

    for (idx, layer) in model.layers.iter().enumerate() {
        let row = data_row(idx);
        if let Some(&dest) = lookups.workspace.get(layer.workspace.as_str()) {
            links.insert(SHEET_LAYERS, row, 0, internal(SHEET_WORKSPACES, dest, 0));
        }
        if let Some(&dest) = lookups.store.get(layer.store.as_str()) {
            links.insert(SHEET_LAYERS, row, 1, internal(SHEET_STORES, dest, 1));
        }
        if let Some(&dest) = lookups.group.get(layer.group.as_str()) {
            links.insert(SHEET_LAYERS, row, 2, internal(SHEET_LAYER_GROUPS, dest, 0));
        }
        if let Some(&dest) = lookups.style.get(layer.default_style.as_str()) {
            links.insert(SHEET_LAYERS, row, 5, internal(SHEET_STYLES, dest, 0));
        }
    }
}

/// Styles sheet: both columns carry external document links.
fn annotate_styles(model: &ReportModel, links: &mut LinkSet) {
    for (idx, style) in model.styles.iter().enumerate() {
        let row = data_row(idx);
        links.insert(SHEET_STYLES, row, 0, LinkTarget::External(style.sld_link.clone()));
        links.insert(SHEET_STYLES, row, 1, LinkTarget::External(style.html_link.clone()));
    }
}

/// Per-group sub-sheets: headers and key-bearing columns link back to the
/// master sheets; member names link to the Layers sheet or, for nested group
/// references that resolve, to the Layer Groups sheet. Self-references are
/// fine.
fn annotate_group_sheets(
    model: &ReportModel,
    title_limit: usize,
    lookups: &Lookups<'_>,
    links: &mut LinkSet,
) {
    for sheet in &model.group_sheets {
        let title = group_sheet_title(&sheet.group_name, title_limit);
        links.insert(&title, 0, 0, internal(SHEET_WORKSPACES, 0, 0));
        links.insert(&title, 0, 1, internal(SHEET_STORES, 0, 0));
        links.insert(&title, 0, 2, internal(SHEET_LAYER_GROUPS, 0, 0));
        links.insert(&title, 0, 5, internal(SHEET_LAYERS, 0, 0));
        links.insert(&title, 0, 7, internal(SHEET_STYLES, 0, 0));

        for (idx, row) in sheet.rows.iter().enumerate() {
            let sheet_row = data_row(idx);
            if let Some(&dest) = lookups.workspace.get(row.workspace.as_str()) {
                links.insert(&title, sheet_row, 0, internal(SHEET_WORKSPACES, dest, 0));
            }
            if let Some(&dest) = lookups.store.get(row.store.as_str()) {
                links.insert(&title, sheet_row, 1, internal(SHEET_STORES, dest, 1));
            }
            if let Some(&dest) = lookups.group.get(row.group.as_str()) {
                links.insert(&title, sheet_row, 2, internal(SHEET_LAYER_GROUPS, dest, 0));
            }
            let member_dest = match row.member_kind {
                MemberKind::Layer => lookups
                    .layer
                    .get(row.member_name.as_str())
                    .map(|&dest| internal(SHEET_LAYERS, dest, 3)),
                MemberKind::Group => lookups
                    .group
                    .get(row.member_name.as_str())
                    .map(|&dest| internal(SHEET_LAYER_GROUPS, dest, 0)),
            };
            if let Some(target) = member_dest {
                links.insert(&title, sheet_row, 5, target);
            }
            if let Some(&dest) = lookups.style.get(row.style.as_str()) {
                links.insert(&title, sheet_row, 7, internal(SHEET_STYLES, dest, 0));
            }
        }
    }
}
