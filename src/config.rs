use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Column selection and graph-level options for one build request.
///
/// `source_column` and `target_column` are mandatory; every other column
/// is optional and simply ignored when absent from a row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub source_column: String,
    pub target_column: String,
    /// Hard cap on newly introduced nodes. Reaching it stops the whole
    /// row scan, not just the offending row.
    pub max_nodes: usize,
    #[serde(default)]
    pub source_color_column: Option<String>,
    #[serde(default)]
    pub source_size_column: Option<String>,
    #[serde(default)]
    pub target_color_column: Option<String>,
    #[serde(default)]
    pub target_size_column: Option<String>,
    #[serde(default)]
    pub edge_caption_column: Option<String>,
    #[serde(default)]
    pub edge_width_column: Option<String>,
    #[serde(default)]
    pub directed: bool,
    /// Treat group values as a numeric gradient rather than categories.
    #[serde(default)]
    pub numeric_colors: bool,
    #[serde(default = "default_layout_scale")]
    pub layout_scale: f32,
    #[serde(default = "default_layout_scale_ratio")]
    pub layout_scale_ratio: f32,
}

fn default_layout_scale() -> f32 {
    500.0
}

fn default_layout_scale_ratio() -> f32 {
    1.5
}

impl GraphConfig {
    pub fn new(source_column: &str, target_column: &str) -> Self {
        Self {
            source_column: source_column.to_string(),
            target_column: target_column.to_string(),
            max_nodes: 1000,
            source_color_column: None,
            source_size_column: None,
            target_color_column: None,
            target_size_column: None,
            edge_caption_column: None,
            edge_width_column: None,
            directed: false,
            numeric_colors: false,
            layout_scale: default_layout_scale(),
            layout_scale_ratio: default_layout_scale_ratio(),
        }
    }

    /// Rejects configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.max_nodes == 0 {
            return Err(GraphError::InvalidConfig {
                reason: "max_nodes must be positive".to_string(),
            });
        }
        if !(self.layout_scale > 0.0) {
            return Err(GraphError::InvalidConfig {
                reason: "layout_scale must be positive".to_string(),
            });
        }
        if !(self.layout_scale_ratio > 0.0) {
            return Err(GraphError::InvalidConfig {
                reason: "layout_scale_ratio must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Tunables for the layout pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Gradient-descent iterations for the coarse Kamada-Kawai pass.
    pub coarse_iterations: usize,
    /// Step size for the coarse stress descent.
    pub coarse_step: f32,
    /// Relaxation iterations for the Fruchterman-Reingold pass.
    pub refine_iterations: usize,
    /// Multiplicative temperature decay per refinement iteration.
    pub cooling: f32,
    /// Lower distance clamp for force evaluation.
    pub min_distance: f32,
    /// Gap contraction only runs above this node count.
    pub gap_min_nodes: usize,
    /// A gap is anomalous when it exceeds `mean + k * stdev` of the
    /// consecutive differences on its axis.
    pub gap_deviation_factor: f32,
    /// Fraction of an anomalous gap that gets closed. Must stay below 1
    /// so the axis order is preserved.
    pub gap_translation_factor: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            coarse_iterations: 60,
            coarse_step: 0.1,
            refine_iterations: 50,
            cooling: 0.95,
            min_distance: 0.01,
            gap_min_nodes: 10,
            gap_deviation_factor: 2.0,
            gap_translation_factor: 0.9,
        }
    }
}

/// On-disk config file: graph options plus optional layout overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub graph: GraphConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    // Strict JSON first, JSON5 as the lenient fallback.
    let parsed: Config = match serde_json::from_str(&contents) {
        Ok(config) => config,
        Err(_) => json5::from_str(&contents)?,
    };
    parsed.graph.validate()?;
    Ok(parsed)
}
