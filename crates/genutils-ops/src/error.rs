use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("No asset info for denom: {0}")]
    UnknownAsset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("State error: {0}")]
    State(#[from] genutils_state::StateError),

    #[error("Core error: {0}")]
    Core(#[from] genutils_core::CoreError),
}
