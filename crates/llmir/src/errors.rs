use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("Unsupported chunk type in {context}: {kind}")]
    UnsupportedChunk {
        context: &'static str,
        kind: &'static str,
    },

    #[error("Invalid UTF-8 in text/plain file chunk: {0}")]
    Decode(String),

    #[error("Could not serialize tool call arguments: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Message with tool role carries no tool call id; use ToolResponseMessage")]
    ToolRoleWithoutId,

    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),
}

pub type ProjectionResult<T> = Result<T, ProjectionError>;
