use thiserror::Error;

/// Result type for construct operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or importing constructs.
///
/// Every variant is raised synchronously, before anything is registered with
/// the [`Stack`](crate::stack::Stack). Semantic problems the managed service
/// checks itself (weight sums, step ordering, dangling names) are not reported
/// here unless the strict reference check is enabled.
#[derive(Debug, Error)]
pub enum Error {
    /// A cardinality constraint was violated (too many metric goals or launch
    /// groups, or a feature without variations).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid ARN: {0}")]
    InvalidArn(String),

    /// The stack already contains a resource with this logical id.
    #[error("Duplicate logical id: {0}")]
    DuplicateLogicalId(String),

    /// A name reference that does not resolve inside the app config.
    #[error("Dangling reference: {0}")]
    DanglingReference(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
