use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy for the selection / analysis layers
// ---------------------------------------------------------------------------

/// Errors produced past the loading step.
///
/// `MissingColumn` is a configuration problem: the dataset cannot back the
/// dashboard at all and must be replaced. `Computation` is scoped to a single
/// render pass; the next valid interaction recovers.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The loaded table lacks a column the current view requires.
    #[error("configuration error: column '{column}' not found in the dataset")]
    MissingColumn { column: String },

    /// A derived computation is undefined for the current input.
    #[error("computation error: {0}")]
    Computation(String),
}
