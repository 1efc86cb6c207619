use thiserror::Error;

/// Rejected experiment configuration. Every variant maps to its own process exit status, so
/// scripts driving many experiment runs can tell which argument was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Invalid shuffle value: {0}, expected 0-100")]
    InvalidShuffle(i64),

    #[error("Invalid twins value: {0}, expected 0-100")]
    InvalidTwins(i64),

    #[error("Invalid pivot method: {0}")]
    InvalidPivotMethod(String),

    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("Invalid run count: {0}, at least one run is required")]
    InvalidRuns(usize),
}

impl ConfigError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidOrder(_) => 2,
            Self::InvalidShuffle(_) => 3,
            Self::InvalidTwins(_) => 4,
            Self::InvalidPivotMethod(_) => 5,
            Self::InvalidDistribution(_) => 6,
            Self::InvalidRuns(_) => 7,
        }
    }
}
