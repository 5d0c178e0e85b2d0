pub mod history;
pub mod loss;
pub mod metrics;
pub mod network;
pub mod replay;
pub mod samples;

pub use history::{EpochRecord, LossHistory};
pub use replay::replay;
