use thiserror::Error;

/// Reasons a [`SceneConfig`](crate::SceneConfig) is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must lie strictly between 0 and 1, got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("star inner radius {inner} must be smaller than outer radius {outer}")]
    StarRadii { inner: f32, outer: f32 },
    #[error("invalid value {value:?} for query parameter `{key}`")]
    InvalidQueryValue { key: String, value: String },
}
