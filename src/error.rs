use thiserror::Error;

/// Errors that can occur while compiling a block graph.
///
/// Unknown kinds, unknown sub-types and missing fields are never errors; they
/// degrade to skipped blocks or documented defaults. Only structurally broken
/// input is reported here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Cyclic graph detected at block '{block_id}' (nesting depth {depth})")]
    CyclicGraph { block_id: String, depth: usize },

    #[error("Failed to parse block graph JSON: {0}")]
    JsonParse(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Errors that can occur when converting a custom editor format into botgen blocks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid custom data: {0}")]
    Validation(String),
}
