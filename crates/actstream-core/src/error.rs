use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActstreamError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("template not found, tried: {}", .0.join(", "))]
    TemplateNotFound(Vec<String>),

    #[error("unsupported action file format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ActstreamError>;
