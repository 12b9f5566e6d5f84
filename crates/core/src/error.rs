use thiserror::Error;

/// Route template errors
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Invalid route pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
