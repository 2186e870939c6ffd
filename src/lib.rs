pub mod builder;
#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod row;

pub use builder::GraphBuilder;
pub use config::{Config, GraphConfig, LayoutConfig, load_config};
pub use error::GraphError;
pub use layout::{GraphIndex, compute_positions};
pub use model::{GraphModel, GraphOutput, GroupColor};
pub use row::{Row, Value};

#[cfg(feature = "cli")]
pub use cli::run;

/// Runs the whole pipeline over an in-memory row sequence: builds the
/// deduplicated model, resolves group colors, computes layout
/// coordinates, and returns the renderable output.
pub fn build_graph(
    rows: &[Row],
    graph_config: &GraphConfig,
    layout_config: &LayoutConfig,
) -> Result<GraphOutput, GraphError> {
    let mut model = GraphBuilder::new(graph_config).build(rows)?;
    let groups = color::resolve_group_colors(&model, graph_config.numeric_colors);
    let positions = compute_positions(&model, graph_config, layout_config);
    model.apply_positions(&positions);
    Ok(model.into_output(groups))
}
