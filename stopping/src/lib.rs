mod error;
mod monitor;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use monitor::{EarlyStopping, DEFAULT_MIN_DELTA, DEFAULT_TOLERANCE};
