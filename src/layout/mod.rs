mod treemap;
pub(crate) mod types;
pub use types::*;

use crate::config::LayoutConfig;
use crate::error::{Result, TreemapError};
use crate::hierarchy::{Hierarchy, NodeId};
use treemap::squarify;

/// Squarified layout of every leaf into a `width` x `height` surface, with
/// coordinates snapped to whole pixels.
pub fn layout(
    tree: &Hierarchy,
    width: f64,
    height: f64,
    padding: f64,
) -> Result<Vec<PositionedLeaf>> {
    layout_with(
        tree,
        &LayoutConfig {
            width,
            height,
            padding,
            round: true,
        },
    )
}

pub fn layout_with(tree: &Hierarchy, config: &LayoutConfig) -> Result<Vec<PositionedLeaf>> {
    let LayoutConfig {
        width,
        height,
        padding,
        round,
    } = *config;
    if !(width.is_finite() && height.is_finite() && padding.is_finite())
        || width <= 0.0
        || height <= 0.0
        || padding < 0.0
    {
        return Err(TreemapError::InvalidBounds {
            width,
            height,
            padding,
        });
    }

    let order = sorted_children(tree);
    let inner = padding / 2.0;
    let mut boxes = vec![Rect::default(); tree.len()];
    boxes[tree.root().0] = Rect::new(0.0, 0.0, width, height);

    let visit = pre_order(tree, &order);
    for &id in &visit {
        let node = tree.node(id);
        let own = if node.depth == 0 { 0.0 } else { inner };
        let rect = boxes[id.0].inset(own);
        boxes[id.0] = rect;
        let children = &order[id.0];
        if children.is_empty() {
            continue;
        }
        squarify(tree, children, node.sum, rect.inset(padding - inner), &mut boxes);
    }

    if round {
        for rect in boxes.iter_mut() {
            *rect = rect.round();
        }
    }

    let leaves: Vec<PositionedLeaf> = visit
        .into_iter()
        .filter(|id| tree.node(*id).is_leaf())
        .filter_map(|id| {
            let rect = boxes[id.0];
            (rect.width() > 0.0 && rect.height() > 0.0).then(|| PositionedLeaf::new(id, rect))
        })
        .collect();
    tracing::debug!(
        leaves = leaves.len(),
        width,
        height,
        padding,
        "computed treemap layout"
    );
    Ok(leaves)
}

/// Children of every node by descending sum; the stable sort keeps dataset
/// order among equal sums.
fn sorted_children(tree: &Hierarchy) -> Vec<Vec<NodeId>> {
    (0..tree.len())
        .map(|idx| {
            let mut children = tree.node(NodeId(idx)).children.clone();
            children.sort_by(|a, b| tree.node(*b).sum.total_cmp(&tree.node(*a).sum));
            children
        })
        .collect()
}

fn pre_order(tree: &Hierarchy, order: &[Vec<NodeId>]) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(tree.len());
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        out.push(id);
        for &child in order[id.0].iter().rev() {
            stack.push(child);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::RawNode;

    fn two_categories() -> Hierarchy {
        Hierarchy::build(&RawNode::branch(
            "root",
            vec![
                RawNode::branch("A", vec![RawNode::leaf("Leaf1", 10.0, "A")]),
                RawNode::branch("B", vec![RawNode::leaf("Leaf2", 30.0, "B")]),
            ],
        ))
        .unwrap()
    }

    #[test]
    fn two_category_scenario() {
        let tree = two_categories();
        let leaves = layout(&tree, 400.0, 200.0, 1.0).unwrap();
        assert_eq!(leaves.len(), 2);
        // Larger category is laid out first.
        assert_eq!(tree.node(leaves[0].node).name, "Leaf2");
        assert_eq!(leaves[0].rect(), Rect::new(2.0, 2.0, 298.0, 198.0));
        assert_eq!(leaves[1].rect(), Rect::new(301.0, 2.0, 398.0, 198.0));
        let ratio = leaves[0].area() / leaves[1].area();
        assert!((ratio - 3.0).abs() < 0.1, "ratio {ratio}");
    }

    #[test]
    fn rejects_non_positive_bounds() {
        let tree = two_categories();
        for (w, h) in [(0.0, 10.0), (10.0, 0.0), (-5.0, 10.0), (f64::NAN, 10.0)] {
            assert!(matches!(
                layout(&tree, w, h, 1.0),
                Err(TreemapError::InvalidBounds { .. })
            ));
        }
        assert!(layout(&tree, 10.0, 10.0, -1.0).is_err());
    }

    #[test]
    fn ties_keep_dataset_order() {
        let tree = Hierarchy::build(&RawNode::branch(
            "root",
            vec![
                RawNode::leaf("first", 5.0, "x"),
                RawNode::leaf("second", 5.0, "x"),
                RawNode::leaf("third", 5.0, "x"),
            ],
        ))
        .unwrap();
        let leaves = layout(&tree, 300.0, 300.0, 0.0).unwrap();
        let names: Vec<_> = leaves.iter().map(|l| tree.node(l.node).name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn unrounded_layout_keeps_fractions() {
        let tree = Hierarchy::build(&RawNode::branch(
            "root",
            vec![RawNode::leaf("a", 1.0, "x"), RawNode::leaf("b", 2.0, "x")],
        ))
        .unwrap();
        let config = LayoutConfig {
            width: 100.0,
            height: 10.0,
            padding: 0.0,
            round: false,
        };
        let leaves = layout_with(&tree, &config).unwrap();
        let total: f64 = leaves.iter().map(PositionedLeaf::area).sum();
        assert!((total - 1000.0).abs() < 1e-9);
        assert!(leaves.iter().any(|l| l.x1.fract() != 0.0));
    }

    #[test]
    fn empty_dataset_has_no_tiles() {
        let tree = Hierarchy::build(&RawNode::branch(
            "root",
            vec![RawNode::branch("A", vec![RawNode::leaf("zero", 0.0, "A")])],
        ))
        .unwrap();
        assert!(layout(&tree, 100.0, 100.0, 1.0).unwrap().is_empty());
    }
}
