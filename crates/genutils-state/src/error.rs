use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Module not found in app_state: {0}")]
    MissingModule(String),

    #[error("Core error: {0}")]
    Core(#[from] genutils_core::CoreError),
}
