use indicatif::{ProgressBar, ProgressStyle};
use segment::metrics::MetricsAccumulator;
use utils::EpochStats;

const TEMPLATE: &str = "{spinner:.cyan} epoch {prefix} {pos}/{len} [{wide_bar:.cyan/blue}] {eta_precise} | {msg}";

/// Batch progress for one epoch, with the running loss and pixel accuracy.
pub struct EpochProgress {
    bar: ProgressBar,
}

impl EpochProgress {
    pub fn new(epoch: usize, num_batches: usize) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(num_batches as u64);
        bar.set_style(ProgressStyle::default_bar().template(TEMPLATE)?);
        bar.set_prefix(epoch.to_string());
        Ok(Self { bar })
    }

    pub fn update(&self, running: &MetricsAccumulator) {
        self.bar.set_message(format!(
            "loss: {:.5}, pixAcc: {:.2}%",
            running.loss(),
            running.pixel_accuracy() * 100.0
        ));
        self.bar.inc(1);
    }

    /// Leaves the bar showing how the epoch ended on the validation split.
    pub fn finish(&self, train: &EpochStats, val: &EpochStats) {
        self.bar.set_message(format!(
            "loss: {:.5}, val: {:.5}, val pixAcc: {:.2}%, val mIoU: {:.2}%",
            train.loss,
            val.loss,
            val.pixel_accuracy * 100.0,
            val.mean_iou * 100.0
        ));
        self.bar.finish();
    }
}
