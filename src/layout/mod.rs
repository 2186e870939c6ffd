mod coarse;
mod contract;
mod refine;
mod rescale;

use std::time::Instant;

use log::info;

use crate::config::{GraphConfig, LayoutConfig};
use crate::model::GraphModel;

/// Vertex/edge-index view of the model, in node-table order.
///
/// This is also the narrow seam for hosts that want to hand the graph
/// structure to an external graph-algorithms library.
#[derive(Debug, Clone)]
pub struct GraphIndex {
    node_count: usize,
    edges: Vec<(usize, usize)>,
}

impl GraphIndex {
    pub fn from_model(model: &GraphModel) -> Self {
        let edges = model
            .edges()
            .iter()
            .filter_map(|edge| {
                let from = model.node_position(&edge.from)?;
                let to = model.node_position(&edge.to)?;
                Some((from, to))
            })
            .collect();
        Self {
            node_count: model.node_count(),
            edges,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Undirected adjacency lists; self-loops carry no layout force and
    /// are left out.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.node_count];
        for &(a, b) in &self.edges {
            if a == b {
                continue;
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        adjacency
    }
}

/// Runs the full layout pipeline and returns one position per node, in
/// node-table order: coarse global placement, force-directed
/// refinement, gap contraction, and rescaling into the target envelope.
pub fn compute_positions(
    model: &GraphModel,
    graph_config: &GraphConfig,
    layout_config: &LayoutConfig,
) -> Vec<(f32, f32)> {
    let start = Instant::now();
    let index = GraphIndex::from_model(model);
    let mut positions = coarse::kamada_kawai(&index, layout_config);
    refine::fruchterman_reingold(&index, &mut positions, layout_config);
    contract::contract_gaps(&mut positions, layout_config);
    rescale::rescale(
        &mut positions,
        graph_config.layout_scale,
        graph_config.layout_scale_ratio,
    );
    info!(
        "layout computed in {:.4}s for {} nodes",
        start.elapsed().as_secs_f64(),
        index.node_count()
    );
    positions
}
