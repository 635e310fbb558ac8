use thiserror::Error;

/// Errors produced while building or running a pipeline.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Context error: {0}")]
    ContextError(String),

    #[error("Stage execution failed: {0}")]
    StageFailed(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FlowError>;
