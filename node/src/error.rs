#[derive(thiserror::Error, Debug)]
pub enum NodeError {
    #[error("Unknown node type: {0}")]
    UnknownType(String),

    #[error("Node type {0} is already registered")]
    DuplicateType(String),

    #[error("Malformed node configuration: {0}")]
    MalformedConfig(#[from] serde_json::Error),

    #[error("Invalid node configuration: {0}")]
    InvalidConfig(String),
}
