use crate::error::{Result, TreemapError};
use crate::hierarchy::{Hierarchy, NodeId};

/// Depth-1 category name to palette color, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    entries: Vec<(String, String)>,
}

impl ColorTable {
    /// Assigns `palette[i % palette.len()]` to the i-th distinct category.
    pub fn new(tree: &Hierarchy, palette: &[String]) -> Result<Self> {
        Self::from_names(tree.categories().map(|node| node.name.as_str()), palette)
    }

    pub fn from_names<'a>(
        names: impl IntoIterator<Item = &'a str>,
        palette: &[String],
    ) -> Result<Self> {
        if palette.is_empty() {
            return Err(TreemapError::InvalidPalette);
        }
        let mut entries: Vec<(String, String)> = Vec::new();
        for name in names {
            if entries.iter().any(|(existing, _)| existing == name) {
                continue;
            }
            let color = palette[entries.len() % palette.len()].clone();
            entries.push((name.to_string(), color));
        }
        Ok(Self { entries })
    }

    pub fn color_for(&self, category: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, color)| color.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, color)| (name.as_str(), color.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The node's depth-1 ancestor (itself when it sits at depth 1).
pub fn category_of(tree: &Hierarchy, node: NodeId) -> Result<NodeId> {
    let name = || {
        tree.get(node)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| format!("#{}", node.0))
    };
    match tree.get(node) {
        Some(n) if n.depth >= 1 => {}
        _ => return Err(TreemapError::Unrooted(name())),
    }
    tree.ancestor_at_depth(node, 1)
        .ok_or_else(|| TreemapError::Unrooted(name()))
}

pub fn color_of<'t>(tree: &Hierarchy, node: NodeId, table: &'t ColorTable) -> Result<&'t str> {
    let ancestor = category_of(tree, node)?;
    let category = &tree.node(ancestor).name;
    table
        .color_for(category)
        .ok_or_else(|| TreemapError::UnknownCategory(category.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::RawNode;
    use crate::theme::Theme;

    fn tree() -> Hierarchy {
        Hierarchy::build(&RawNode::branch(
            "root",
            vec![
                RawNode::branch(
                    "Action",
                    vec![
                        RawNode::leaf("Avatar", 760.5, "Action"),
                        RawNode::leaf("The Avengers", 623.3, "Action"),
                    ],
                ),
                RawNode::branch("Drama", vec![RawNode::leaf("Titanic", 658.6, "Drama")]),
            ],
        ))
        .unwrap()
    }

    #[test]
    fn siblings_share_a_color_and_categories_differ() {
        let tree = tree();
        let palette = Theme::pastel().palette;
        let table = ColorTable::new(&tree, &palette).unwrap();
        let leaves = tree.leaves();
        let avatar = color_of(&tree, leaves[0], &table).unwrap();
        let avengers = color_of(&tree, leaves[1], &table).unwrap();
        let titanic = color_of(&tree, leaves[2], &table).unwrap();
        assert_eq!(avatar, avengers);
        assert_ne!(avatar, titanic);
        assert_eq!(avatar, palette[0]);
        assert_eq!(titanic, palette[1]);
    }

    #[test]
    fn palette_cycles_past_its_length() {
        let palette = vec!["red".to_string(), "blue".to_string()];
        let table = ColorTable::from_names(["a", "b", "c", "b"], &palette).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.color_for("a"), Some("red"));
        assert_eq!(table.color_for("b"), Some("blue"));
        assert_eq!(table.color_for("c"), Some("red"));
        let order: Vec<_> = table.entries().map(|(name, _)| name).collect();
        assert_eq!(order, ["a", "b", "c"]);
    }

    #[test]
    fn root_is_unrooted() {
        let tree = tree();
        let table = ColorTable::new(&tree, &Theme::pastel().palette).unwrap();
        assert!(matches!(
            color_of(&tree, tree.root(), &table),
            Err(TreemapError::Unrooted(name)) if name == "root"
        ));
    }

    #[test]
    fn broken_parent_chain_is_unrooted() {
        let mut tree = tree();
        let leaf = tree.leaves()[2];
        tree.node_mut(leaf).parent = None;
        let table = ColorTable::new(&tree, &Theme::pastel().palette).unwrap();
        assert!(matches!(
            color_of(&tree, leaf, &table),
            Err(TreemapError::Unrooted(_))
        ));
    }

    #[test]
    fn foreign_table_reports_unknown_category() {
        let tree = tree();
        let table = ColorTable::from_names(["Sports"], &Theme::pastel().palette).unwrap();
        let leaf = tree.leaves()[0];
        assert_eq!(
            color_of(&tree, leaf, &table),
            Err(TreemapError::UnknownCategory("Action".to_string()))
        );
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(
            ColorTable::from_names(["a"], &[]),
            Err(TreemapError::InvalidPalette)
        );
    }
}
