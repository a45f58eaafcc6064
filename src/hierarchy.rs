use crate::error::{Result, TreemapError};
use serde::{Deserialize, Serialize};

/// A dataset node as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNode>>,
}

/// Leaf values are numbers in hand-written data and numeric strings in the
/// published datasets; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn to_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(value) => Some(*value),
            RawValue::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }

    /// The value as the dataset wrote it, so `"0.10"` stays `0.10`.
    fn display(&self) -> String {
        match self {
            RawValue::Number(value) => format!("{value}"),
            RawValue::Text(text) => text.trim().to_string(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl RawNode {
    pub fn leaf(name: &str, value: f64, category: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value.into()),
            category: Some(category.to_string()),
            children: None,
        }
    }

    pub fn branch(name: &str, children: Vec<RawNode>) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            category: None,
            children: Some(children),
        }
    }

    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|err| TreemapError::malformed("<document>", err.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    /// Own value; only set on leaves.
    pub value: Option<f64>,
    /// `value` as written in the dataset.
    pub value_text: Option<String>,
    pub category: Option<String>,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub sum: f64,
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-backed tree annotated with parent links, depths and subtree sums.
///
/// The root is always `NodeId(0)`; children keep dataset order.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<TreeNode>,
}

impl Hierarchy {
    pub fn build(raw: &RawNode) -> Result<Self> {
        let mut nodes = Vec::new();
        push_node(&mut nodes, raw, None, 0)?;
        let root_sum = nodes[0].sum;
        tracing::debug!(nodes = nodes.len(), sum = root_sum, "built hierarchy");
        Ok(Self { nodes })
    }

    pub fn from_json(input: &str) -> Result<Self> {
        Self::build(&RawNode::from_json(input)?)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.nodes[0].sum
    }

    /// Leaves in pre-order, dataset order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.is_leaf() {
                out.push(id);
            }
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Walks parent links until a node at `depth` is found.
    pub fn ancestor_at_depth(&self, id: NodeId, depth: usize) -> Option<NodeId> {
        let mut current = self.get(id)?;
        let mut current_id = id;
        while current.depth > depth {
            current_id = current.parent?;
            current = self.get(current_id)?;
        }
        (current.depth == depth).then_some(current_id)
    }

    /// Direct children of the root, dataset order.
    pub fn categories(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.nodes[0].children.iter().map(|id| self.node(*id))
    }

    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }
}

fn push_node(
    nodes: &mut Vec<TreeNode>,
    raw: &RawNode,
    parent: Option<NodeId>,
    depth: usize,
) -> Result<NodeId> {
    let id = NodeId(nodes.len());
    let children = raw.children.as_deref().unwrap_or_default();
    let value = match raw.value.as_ref() {
        Some(value) => {
            let parsed = value
                .to_f64()
                .ok_or_else(|| TreemapError::malformed(&raw.name, format!("value {value:?} is not numeric")))?;
            if !parsed.is_finite() {
                return Err(TreemapError::malformed(&raw.name, "value is not finite"));
            }
            if parsed < 0.0 {
                return Err(TreemapError::malformed(
                    &raw.name,
                    format!("value {parsed} is negative"),
                ));
            }
            Some(parsed)
        }
        None => None,
    };

    if children.is_empty() && value.is_none() {
        return Err(TreemapError::malformed(
            &raw.name,
            "node has neither a value nor children",
        ));
    }
    if !children.is_empty() && value.is_some() {
        tracing::debug!(node = %raw.name, "ignoring value on internal node");
    }

    nodes.push(TreeNode {
        name: raw.name.clone(),
        value: if children.is_empty() { value } else { None },
        value_text: if children.is_empty() {
            raw.value.as_ref().map(RawValue::display)
        } else {
            None
        },
        category: raw.category.clone(),
        parent,
        depth,
        sum: 0.0,
        children: Vec::with_capacity(children.len()),
    });

    let mut sum = 0.0;
    for child in children {
        let child_id = push_node(nodes, child, Some(id), depth + 1)?;
        sum += nodes[child_id.0].sum;
        nodes[id.0].children.push(child_id);
    }
    nodes[id.0].sum = if children.is_empty() {
        value.unwrap_or(0.0)
    } else {
        sum
    };
    Ok(id)
}
