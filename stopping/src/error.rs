use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Tolerance must allow at least one qualifying epoch.
    InvalidConfiguration { tolerance: i64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidConfiguration { tolerance } => {
                write!(f, "invalid configuration: tolerance must be positive, got {}", tolerance)
            }
        }
    }
}

impl Error for ConfigError {}
