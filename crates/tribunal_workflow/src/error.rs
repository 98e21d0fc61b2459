use thiserror::Error;
use tribunal_gateway::GatewayError;

/// Failure modes of a workflow operation. The first four carry the text
/// shown privately to the invoker; gateway failures are substituted with
/// a generic notice by the dispatcher.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// User input did not validate. No state was changed.
    #[error("{0}")]
    Validation(String),

    /// The session backing a multi-step flow is gone.
    #[error("{0}")]
    SessionExpired(String),

    /// The actor may not perform this operation.
    #[error("{0}")]
    AccessDenied(String),

    /// The operation only makes sense inside a registered case surface.
    #[error("{0}")]
    UnknownSurface(String),

    /// A platform call on the critical path failed.
    #[error("gateway: {0}")]
    Gateway(#[from] GatewayError),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
