use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::row::Value;

/// Which endpoint of a row a node appeared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Source,
    Target,
}

/// A deduplicated node with merged visual attributes.
///
/// Absent `group`/`value` is a typed state, not a missing map key.
/// Positions are written exactly once, after the layout pipeline.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: Value,
    pub label: String,
    pub group: Option<Value>,
    pub value: Option<Value>,
    pub title: String,
    pub x: f32,
    pub y: f32,
}

impl Node {
    pub fn new(id: Value, group: Option<Value>, value: Option<Value>) -> Self {
        let label = id.to_string();
        Self {
            id,
            label,
            group,
            value,
            title: String::new(),
            x: 0.0,
            y: 0.0,
        }
    }

    /// Applies one role-tagged observation of this node.
    ///
    /// Source role overwrites whatever attributes the row supplies;
    /// target role only fills attributes that are still unset. The
    /// asymmetry is deliberate: when both roles are observed, the
    /// source-role row wins, but attributes it does not supply keep
    /// their target-role values.
    pub fn observe(&mut self, role: NodeRole, group: Option<Value>, value: Option<Value>) {
        match role {
            NodeRole::Source => {
                if group.is_some() {
                    self.group = group;
                }
                if value.is_some() {
                    self.value = value;
                }
            }
            NodeRole::Target => {
                if self.group.is_none() {
                    self.group = group;
                }
                if self.value.is_none() {
                    self.value = value;
                }
            }
        }
    }

    fn derive_title(&mut self) {
        let mut title = format!("id: {}", self.id);
        if let Some(group) = &self.group {
            title.push_str(&format!("<br>color: {group}"));
        }
        if let Some(value) = &self.value {
            title.push_str(&format!("<br>size: {value}"));
        }
        self.title = title;
    }
}

/// A deduplicated edge keyed by its (canonicalized) endpoint pair.
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: Value,
    pub to: Value,
    pub label: Option<Value>,
    /// Explicit width when a width column is configured, otherwise an
    /// occurrence count starting at 1.
    pub value: f64,
    pub title: String,
}

impl Edge {
    pub fn new(from: Value, to: Value, label: Option<Value>, value: f64) -> Self {
        Self {
            from,
            to,
            label,
            value,
            title: String::new(),
        }
    }

    fn derive_title(&mut self) {
        let mut title = format!("{} -> {}", self.from, self.to);
        if let Some(label) = &self.label {
            title.push_str(&format!("<br>caption: {label}"));
        }
        title.push_str(&format!("<br>width: {}", self.value));
        self.title = title;
    }
}

/// Insertion-ordered node and edge tables.
///
/// Layout indexing follows node insertion order, so the tables are kept
/// as vectors with hash indexes on the side rather than sorted maps.
#[derive(Debug, Default)]
pub struct GraphModel {
    nodes: Vec<Node>,
    node_index: HashMap<Value, usize>,
    edges: Vec<Edge>,
    edge_index: HashMap<(Value, Value), usize>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains_node(&self, id: &Value) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn node_position(&self, id: &Value) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn insert_node(&mut self, node: Node) {
        debug_assert!(!self.node_index.contains_key(&node.id));
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    pub fn node_mut(&mut self, id: &Value) -> Option<&mut Node> {
        let idx = *self.node_index.get(id)?;
        self.nodes.get_mut(idx)
    }

    pub fn contains_edge(&self, from: &Value, to: &Value) -> bool {
        self.edge_index
            .contains_key(&(from.clone(), to.clone()))
    }

    pub fn insert_edge(&mut self, edge: Edge) {
        let key = (edge.from.clone(), edge.to.clone());
        debug_assert!(!self.edge_index.contains_key(&key));
        self.edge_index.insert(key, self.edges.len());
        self.edges.push(edge);
    }

    pub fn edge_mut(&mut self, from: &Value, to: &Value) -> Option<&mut Edge> {
        let idx = *self.edge_index.get(&(from.clone(), to.clone()))?;
        self.edges.get_mut(idx)
    }

    /// Derives the display titles for every node and edge. Called once
    /// by the builder after the row scan.
    pub fn finalize_titles(&mut self) {
        for node in &mut self.nodes {
            node.derive_title();
        }
        for edge in &mut self.edges {
            edge.derive_title();
        }
    }

    /// Writes final coordinates onto the nodes, in table order.
    pub fn apply_positions(&mut self, positions: &[(f32, f32)]) {
        debug_assert_eq!(positions.len(), self.nodes.len());
        for (node, &(x, y)) in self.nodes.iter_mut().zip(positions) {
            node.x = x;
            node.y = y;
        }
    }

    pub fn into_output(self, groups: BTreeMap<String, GroupColor>) -> GraphOutput {
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| NodeOutput {
                id: node.id,
                label: node.label,
                group: node.group,
                value: node.value,
                title: node.title,
                x: node.x,
                y: node.y,
            })
            .collect();
        let edges = self
            .edges
            .into_iter()
            .map(|edge| EdgeOutput {
                from: edge.from,
                to: edge.to,
                label: edge.label,
                value: edge.value,
                title: edge.title,
            })
            .collect();
        GraphOutput {
            nodes,
            edges,
            groups,
        }
    }
}

/// Resolved rendering color for one group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupColor {
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeOutput {
    pub id: Value,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub title: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeOutput {
    pub from: Value,
    pub to: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Value>,
    pub value: f64,
    pub title: String,
}

/// The full renderable model handed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct GraphOutput {
    pub nodes: Vec<NodeOutput>,
    pub edges: Vec<EdgeOutput>,
    pub groups: BTreeMap<String, GroupColor>,
}
