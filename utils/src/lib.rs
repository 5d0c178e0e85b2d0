pub mod paths;
pub mod stats;

pub use paths::unique_path;
pub use stats::{EpochStats, Phase};
