use thiserror::Error;

use stockkeep_core::DomainError;

/// Failure of a single console action.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The store or a product rejected the request.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Input reached end-of-file while a prompt was waiting.
    #[error("input closed")]
    InputClosed,

    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}
