//! Report model assembly
//!
//! Applies the canonical sort orders to each entity collection, synthesizes
//! the per-group sub-reports, and flattens everything into sheet row sets for
//! rendering. Pure functions of already-normalized entities; no I/O here.

use georeport_core::types::{
    Layer, LayerGroup, MemberKind, SENTINEL, Store, Style, Workspace,
};
use std::collections::HashMap;

use super::associations::Associations;

/// Title of the Workspaces sheet
pub const SHEET_WORKSPACES: &str = "Workspaces";
/// Title of the Stores sheet
pub const SHEET_STORES: &str = "Stores";
/// Title of the Layer Groups sheet
pub const SHEET_LAYER_GROUPS: &str = "Layer Groups";
/// Title of the Layers sheet
pub const SHEET_LAYERS: &str = "Layers";
/// Title of the Styles sheet
pub const SHEET_STYLES: &str = "Styles";

/// Header row of the Workspaces sheet
pub const WORKSPACE_HEADERS: &[&str] = &["Workspace Name", "HREF"];
/// Header row of the Stores sheet
pub const STORE_HEADERS: &[&str] = &["Workspace Name", "Store Name", "Store URL"];
/// Header row of the Layer Groups sheet
pub const GROUP_HEADERS: &[&str] = &["Group Name", "Title", "CRS", "Bounds", "Mode", "Layers"];
/// Header row of the Layers sheet
pub const LAYER_HEADERS: &[&str] = &[
    "Workspace Name",
    "Store Name",
    "Group Name",
    "Layer Name",
    "Title",
    "Default style",
    "Available styles",
    "CRS",
    "Bounding Box",
    "Abstract",
];
/// Header row of the Styles sheet
pub const STYLE_HEADERS: &[&str] = &["Style name", "Style link"];
/// Header row of every per-group sub-sheet
pub const GROUP_SHEET_HEADERS: &[&str] = &[
    "Workspace",
    "Store",
    "Group",
    "Group title",
    "Member type",
    "Member name",
    "Member title",
    "Style",
];

/// Sub-sheet title for a group, with the group name truncated to `limit`
/// characters to satisfy the sink's sheet-name length cap.
///
/// Truncated collisions between similarly-named groups are not de-duplicated;
/// the sink rejects the duplicate name and the error propagates.
#[must_use]
pub fn group_sheet_title(group_name: &str, limit: usize) -> String {
    let truncated: String = group_name.chars().take(limit).collect();
    format!("Group {truncated}")
}

/// One row of a per-group sub-report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSheetRow {
    /// Workspace of the matched layer, or of the owning group for nested refs
    pub workspace: String,
    /// Store of the matched layer, sentinel for nested refs
    pub store: String,
    /// Owning group name
    pub group: String,
    /// Owning group title
    pub group_title: String,
    /// Member classification
    pub member_kind: MemberKind,
    /// Raw member name
    pub member_name: String,
    /// Title of the matched layer or referenced group, sentinel otherwise
    pub member_title: String,
    /// Default style of the matched layer, sentinel for nested refs
    pub style: String,
}

/// Synthesized sub-report for one layer group
#[derive(Debug, Clone)]
pub struct GroupSheet {
    /// Name of the group this sheet describes
    pub group_name: String,
    /// Ordered membership rows
    pub rows: Vec<GroupSheetRow>,
}

/// The finished in-memory report model: one ordered row set per sheet
#[derive(Debug, Default)]
pub struct ReportModel {
    /// Workspaces in fetch order
    pub workspaces: Vec<Workspace>,
    /// Stores ordered by (workspace, name)
    pub stores: Vec<Store>,
    /// Layer groups ordered by name
    pub groups: Vec<LayerGroup>,
    /// Layers ordered by (workspace, store, group, name)
    pub layers: Vec<Layer>,
    /// Styles in fetch order
    pub styles: Vec<Style>,
    /// One sub-report per group, in group order
    pub group_sheets: Vec<GroupSheet>,
}

/// Build the report model from normalized entities.
///
/// Sorting is total, so the output is a pure function of the input sets:
/// rebuilding from identical entities yields identical row order.
#[must_use]
pub fn build(
    workspaces: Vec<Workspace>,
    mut stores: Vec<Store>,
    mut groups: Vec<LayerGroup>,
    mut layers: Vec<Layer>,
    styles: Vec<Style>,
    associations: &Associations,
) -> ReportModel {
    stores.sort_by(|a, b| (&a.workspace, &a.name).cmp(&(&b.workspace, &b.name)));
    layers.sort_by(|a, b| {
        (&a.workspace, &a.store, &a.group, &a.name).cmp(&(&b.workspace, &b.store, &b.group, &b.name))
    });
    groups.sort_by(|a, b| a.name.cmp(&b.name));

    let group_sheets = synthesize_group_sheets(&groups, &layers, associations);

    ReportModel {
        workspaces,
        stores,
        groups,
        layers,
        styles,
        group_sheets,
    }
}

/// Synthesize one sub-report per group.
///
/// A `Layer` member pulls workspace, store, title and default style from the
/// matched layer. A `Group` member is a one-level reference: workspace comes
/// from the owning group, the title from the referenced group when it exists,
/// and the remaining columns are sentinels. Nested groups are not expanded.
fn synthesize_group_sheets(
    groups: &[LayerGroup],
    layers: &[Layer],
    associations: &Associations,
) -> Vec<GroupSheet> {
    let layer_by_name: HashMap<&str, &Layer> =
        layers.iter().map(|l| (l.name.as_str(), l)).collect();
    let group_title_by_name: HashMap<&str, &str> = groups
        .iter()
        .map(|g| (g.name.as_str(), g.title.as_str()))
        .collect();

    groups
        .iter()
        .map(|group| {
            let rows = associations
                .members_of(&group.name)
                .iter()
                .map(|member| {
                    let matched = (member.kind == MemberKind::Layer)
                        .then(|| layer_by_name.get(member.name.as_str()))
                        .flatten();
                    match matched {
                        Some(layer) => GroupSheetRow {
                            workspace: layer.workspace.clone(),
                            store: layer.store.clone(),
                            group: group.name.clone(),
                            group_title: group.title.clone(),
                            member_kind: MemberKind::Layer,
                            member_name: member.name.clone(),
                            member_title: layer.title.clone(),
                            style: layer.default_style.clone(),
                        },
                        None => GroupSheetRow {
                            workspace: group.workspace.clone(),
                            store: SENTINEL.to_string(),
                            group: group.name.clone(),
                            group_title: group.title.clone(),
                            member_kind: MemberKind::Group,
                            member_name: member.name.clone(),
                            member_title: group_title_by_name
                                .get(member.name.as_str())
                                .map_or_else(|| SENTINEL.to_string(), ToString::to_string),
                            style: SENTINEL.to_string(),
                        },
                    }
                })
                .collect();

            GroupSheet {
                group_name: group.name.clone(),
                rows,
            }
        })
        .collect()
}

/// Flattened sheet: title, header row, data rows, tab classification
#[derive(Debug, Clone)]
pub struct SheetData {
    /// Sheet title as it appears on the tab
    pub title: String,
    /// Header row
    pub headers: &'static [&'static str],
    /// Ordered data rows
    pub rows: Vec<Vec<String>>,
    /// Whether this is a per-group sub-sheet (tab marker policy)
    pub group_tab: bool,
}

impl ReportModel {
    /// Flatten the model into renderable sheets, in the fixed artifact order:
    /// the five master sheets, then one sheet per group.
    #[must_use]
    pub fn sheets(&self, title_limit: usize) -> Vec<SheetData> {
        let mut sheets = vec![
            SheetData {
                title: SHEET_WORKSPACES.to_string(),
                headers: WORKSPACE_HEADERS,
                rows: self
                    .workspaces
                    .iter()
                    .map(|ws| vec![ws.name.clone(), ws.href.clone()])
                    .collect(),
                group_tab: false,
            },
            SheetData {
                title: SHEET_STORES.to_string(),
                headers: STORE_HEADERS,
                rows: self
                    .stores
                    .iter()
                    .map(|st| vec![st.workspace.clone(), st.name.clone(), st.url.clone()])
                    .collect(),
                group_tab: false,
            },
            SheetData {
                title: SHEET_LAYER_GROUPS.to_string(),
                headers: GROUP_HEADERS,
                rows: self
                    .groups
                    .iter()
                    .map(|g| {
                        vec![
                            g.name.clone(),
                            g.title.clone(),
                            g.crs.clone(),
                            g.bounds.clone(),
                            g.mode.clone(),
                            g.members_joined.clone(),
                        ]
                    })
                    .collect(),
                group_tab: false,
            },
            SheetData {
                title: SHEET_LAYERS.to_string(),
                headers: LAYER_HEADERS,
                rows: self
                    .layers
                    .iter()
                    .map(|l| {
                        vec![
                            l.workspace.clone(),
                            l.store.clone(),
                            l.group.clone(),
                            l.name.clone(),
                            l.title.clone(),
                            l.default_style.clone(),
                            l.styles_joined.clone(),
                            l.crs.clone(),
                            l.bbox.clone(),
                            l.abstract_.clone(),
                        ]
                    })
                    .collect(),
                group_tab: false,
            },
            SheetData {
                title: SHEET_STYLES.to_string(),
                headers: STYLE_HEADERS,
                rows: self
                    .styles
                    .iter()
                    .map(|s| vec![s.name.clone(), s.html_link.clone()])
                    .collect(),
                group_tab: false,
            },
        ];

        sheets.extend(self.group_sheets.iter().map(|sheet| SheetData {
            title: group_sheet_title(&sheet.group_name, title_limit),
            headers: GROUP_SHEET_HEADERS,
            rows: sheet
                .rows
                .iter()
                .map(|row| {
                    vec![
                        row.workspace.clone(),
                        row.store.clone(),
                        row.group.clone(),
                        row.group_title.clone(),
                        row.member_kind.as_label().to_string(),
                        row.member_name.clone(),
                        row.member_title.clone(),
                        row.style.clone(),
                    ]
                })
                .collect(),
            group_tab: true,
        }));

        sheets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{associations, normalize};
    use georeport_core::types::{
        LayerStyleInfo, RawLayer, RawLayerGroup, RawStore, RawWorkspace,
    };
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    const BASE: &str = "http://example.org/rest";

    fn raw_layer(workspace: &str, store: &str, name: &str) -> RawLayer {
        RawLayer {
            workspace: Some(workspace.to_string()),
            store: Some(store.to_string()),
            name: name.to_string(),
            title: Some(format!("{name} title")),
            bbox: None,
            abstract_: None,
        }
    }

    fn raw_group(name: &str, title: &str, members: &[&str]) -> RawLayerGroup {
        RawLayerGroup {
            workspace: Some("ws1".to_string()),
            name: name.to_string(),
            title: Some(title.to_string()),
            bounds: None,
            mode: None,
            members: members.iter().map(ToString::to_string).collect(),
        }
    }

    fn build_fixture() -> ReportModel {
        let raw_groups = vec![
            raw_group("g1", "Group one", &["L1", "L2"]),
            raw_group("g2", "Group two", &["g3"]),
            raw_group("g3", "Group three", &[]),
            raw_group("g4", "Group four", &["ghost"]),
        ];
        let raw_layers = vec![
            raw_layer("ws1", "st1", "L2"),
            raw_layer("ws1", "st1", "L1"),
        ];
        let layer_names: HashSet<&str> = raw_layers.iter().map(|l| l.name.as_str()).collect();
        let assoc = associations::resolve(&raw_groups, &layer_names);

        let workspaces = vec![normalize::workspace(RawWorkspace {
            name: "ws1".to_string(),
            href: None,
        })];
        let stores = vec![normalize::store(
            RawStore {
                workspace: Some("ws1".to_string()),
                name: "st1".to_string(),
            },
            BASE,
        )];
        let groups = raw_groups.into_iter().map(normalize::layer_group).collect();
        let layers = raw_layers
            .into_iter()
            .map(|raw| {
                let owner = assoc.owner_of(&raw.name).map(ToString::to_string);
                let styles = if raw.name == "L1" {
                    LayerStyleInfo {
                        default_style: Some("s1".to_string()),
                        available_styles: vec!["s1".to_string()],
                    }
                } else {
                    LayerStyleInfo::default()
                };
                normalize::layer(raw, styles, owner.as_deref())
            })
            .collect();

        build(workspaces, stores, groups, layers, Vec::new(), &assoc)
    }

    #[test]
    fn test_row_ordering() {
        let model = build_fixture();
        // Layers sorted by (workspace, store, group, name): L1 before L2
        let names: Vec<&str> = model.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["L1", "L2"]);
        let group_names: Vec<&str> = model.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(group_names, vec!["g1", "g2", "g3", "g4"]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = build_fixture();
        let second = build_fixture();
        assert_eq!(first.layers, second.layers);
        assert_eq!(first.stores, second.stores);
        assert_eq!(
            first.sheets(25).iter().map(|s| s.rows.clone()).collect::<Vec<_>>(),
            second.sheets(25).iter().map(|s| s.rows.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_owned_layers_resolve_group() {
        let model = build_fixture();
        for layer in &model.layers {
            assert_eq!(layer.group, "g1");
        }
    }

    #[test]
    fn test_group_sheet_layer_members() {
        let model = build_fixture();
        let g1 = &model.group_sheets[0];
        assert_eq!(g1.group_name, "g1");
        assert_eq!(g1.rows.len(), 2);
        assert_eq!(g1.rows[0].member_kind, MemberKind::Layer);
        assert_eq!(g1.rows[0].member_name, "L1");
        assert_eq!(g1.rows[0].workspace, "ws1");
        assert_eq!(g1.rows[0].store, "st1");
        assert_eq!(g1.rows[0].style, "s1");
        assert_eq!(g1.rows[1].member_name, "L2");
        assert_eq!(g1.rows[1].style, SENTINEL);
    }

    #[test]
    fn test_group_sheet_nested_group_member() {
        let model = build_fixture();
        let g2 = &model.group_sheets[1];
        assert_eq!(g2.rows.len(), 1);
        let row = &g2.rows[0];
        assert_eq!(row.member_kind, MemberKind::Group);
        assert_eq!(row.member_name, "g3");
        // Title resolved from the referenced group, one level only
        assert_eq!(row.member_title, "Group three");
        assert_eq!(row.store, SENTINEL);
        assert_eq!(row.style, SENTINEL);
    }

    #[test]
    fn test_group_sheet_ghost_member() {
        let model = build_fixture();
        let g4 = &model.group_sheets[3];
        let row = &g4.rows[0];
        assert_eq!(row.member_kind, MemberKind::Group);
        assert_eq!(row.member_name, "ghost");
        assert_eq!(row.member_title, SENTINEL);
    }

    #[test]
    fn test_sheets_fixed_order_and_count() {
        let model = build_fixture();
        let sheets = model.sheets(25);
        let titles: Vec<&str> = sheets.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Workspaces",
                "Stores",
                "Layer Groups",
                "Layers",
                "Styles",
                "Group g1",
                "Group g2",
                "Group g3",
                "Group g4",
            ]
        );
        assert_eq!(sheets.len(), 5 + model.groups.len());
        assert!(sheets[5].group_tab);
        assert!(!sheets[0].group_tab);
    }

    #[test]
    fn test_absent_fields_render_as_sentinel_in_rows() {
        let model = build_fixture();
        let sheets = model.sheets(25);
        // Workspace href was absent in the source
        assert_eq!(sheets[0].rows[0], vec!["ws1".to_string(), SENTINEL.to_string()]);
        // Every cell is populated; no empty strings anywhere
        for sheet in &sheets {
            for row in &sheet.rows {
                assert_eq!(row.len(), sheet.headers.len());
                assert!(row.iter().all(|cell| !cell.is_empty()));
            }
        }
    }

    #[test]
    fn test_group_sheet_title_truncation() {
        assert_eq!(group_sheet_title("basemap", 25), "Group basemap");
        let long = "a_very_long_group_name_that_keeps_going";
        let title = group_sheet_title(long, 25);
        assert_eq!(title, "Group a_very_long_group_name_th");
        assert_eq!(title.chars().count(), "Group ".len() + 25);

        // Two distinct names sharing a truncated prefix collide; the
        // collision is surfaced by the sink, not resolved here
        let other = "a_very_long_group_name_that_differs_later";
        assert_eq!(group_sheet_title(long, 25), group_sheet_title(other, 25));
    }
}
