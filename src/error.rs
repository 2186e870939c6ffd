use thiserror::Error;

/// Fatal pipeline errors.
///
/// Row-level data problems (incomparable endpoints, rows missing the
/// source or target column) are logged and skipped, never surfaced here.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("column '{column}' is declared numeric but contains non-numeric value '{value}'")]
    NonNumericColumn { column: String, value: String },

    #[error("no nodes were produced from the input rows")]
    EmptyGraph,
}
