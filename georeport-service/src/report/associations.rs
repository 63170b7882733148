//! Group/layer association resolution
//!
//! Builds the many-to-many mapping between layer groups and the members they
//! list: a reverse index from layer name to owning group, and per group an
//! ordered classification of each member name. Classification is best-effort
//! and never fails: a member name that matches no known layer is treated as a
//! nested-group reference even when no such group exists.

use georeport_core::types::{GroupMemberRow, MemberKind, RawLayerGroup};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Resolved group/layer associations
#[derive(Debug, Default)]
pub struct Associations {
    /// Layer name → owning group name. When several groups list the same
    /// layer, the group latest in fetch order wins.
    pub owner_by_layer: HashMap<String, String>,

    /// Group name → ordered membership rows, in group fetch order
    pub members_by_group: IndexMap<String, Vec<GroupMemberRow>>,
}

impl Associations {
    /// Owning group of a layer, if any group lists it
    #[must_use]
    pub fn owner_of(&self, layer_name: &str) -> Option<&str> {
        self.owner_by_layer.get(layer_name).map(String::as_str)
    }

    /// Membership rows of a group
    #[must_use]
    pub fn members_of(&self, group_name: &str) -> &[GroupMemberRow] {
        self.members_by_group
            .get(group_name)
            .map_or(&[], Vec::as_slice)
    }
}

/// Resolve associations between groups and layers.
///
/// `layer_names` is the set of known layer names; a member name found there
/// classifies as [`MemberKind::Layer`] even if a group shares the same name.
#[must_use]
pub fn resolve(groups: &[RawLayerGroup], layer_names: &HashSet<&str>) -> Associations {
    let mut associations = Associations::default();

    for group in groups {
        let mut rows = Vec::with_capacity(group.members.len());
        for member in &group.members {
            let kind = if layer_names.contains(member.as_str()) {
                associations
                    .owner_by_layer
                    .insert(member.clone(), group.name.clone());
                MemberKind::Layer
            } else {
                MemberKind::Group
            };
            rows.push(GroupMemberRow {
                kind,
                name: member.clone(),
            });
        }
        associations.members_by_group.insert(group.name.clone(), rows);
    }

    associations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, members: &[&str]) -> RawLayerGroup {
        RawLayerGroup {
            name: name.to_string(),
            members: members.iter().map(ToString::to_string).collect(),
            ..RawLayerGroup::default()
        }
    }

    #[test]
    fn test_members_classified_in_order() {
        let groups = vec![group("basemap", &["roads", "hydrology", "ghost"])];
        let layers: HashSet<&str> = ["roads"].into();

        let associations = resolve(&groups, &layers);
        let rows = associations.members_of("basemap");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].kind, MemberKind::Layer);
        assert_eq!(rows[1].kind, MemberKind::Group);
        // Unknown names degrade to nested-group references, never errors
        assert_eq!(rows[2].kind, MemberKind::Group);
        assert_eq!(rows[2].name, "ghost");
    }

    #[test]
    fn test_reverse_index() {
        let groups = vec![group("basemap", &["roads"]), group("transport", &["rail"])];
        let layers: HashSet<&str> = ["roads", "rail", "unowned"].into();

        let associations = resolve(&groups, &layers);
        assert_eq!(associations.owner_of("roads"), Some("basemap"));
        assert_eq!(associations.owner_of("rail"), Some("transport"));
        assert_eq!(associations.owner_of("unowned"), None);
    }

    #[test]
    fn test_layer_match_wins_over_group_name() {
        // "overlay" is both a known layer and a group; the layer match wins
        let groups = vec![group("overlay", &[]), group("basemap", &["overlay"])];
        let layers: HashSet<&str> = ["overlay"].into();

        let associations = resolve(&groups, &layers);
        let rows = associations.members_of("basemap");
        assert_eq!(rows[0].kind, MemberKind::Layer);
        assert_eq!(associations.owner_of("overlay"), Some("basemap"));
    }

    #[test]
    fn test_duplicate_listing_last_group_wins() {
        let groups = vec![group("first", &["roads"]), group("second", &["roads"])];
        let layers: HashSet<&str> = ["roads"].into();

        let associations = resolve(&groups, &layers);
        assert_eq!(associations.owner_of("roads"), Some("second"));
    }

    #[test]
    fn test_empty_inputs() {
        let associations = resolve(&[], &HashSet::new());
        assert!(associations.owner_by_layer.is_empty());
        assert!(associations.members_of("anything").is_empty());
    }
}
