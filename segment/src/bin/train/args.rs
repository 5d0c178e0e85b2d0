use clap::Parser;
use segment::samples::DEFAULT_IMAGE_SIZE;

#[derive(Parser, Debug, Clone)]
#[command(name = "Segmentation Trainer")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Number of images per training batch.
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Initial learning rate for optimizer.
    #[arg(long, default_value_t = 0.01)]
    pub learning_rate: f64,

    /// Maximum number of training epochs.
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// Number of synthetic images to generate.
    #[arg(long, default_value_t = 2048)]
    pub samples: usize,

    /// Side length of the square images, in pixels.
    #[arg(long, default_value_t = DEFAULT_IMAGE_SIZE)]
    pub image_size: usize,

    /// Fraction of data for validation set.
    #[arg(long, default_value_t = 0.1)]
    pub val_ratio: f64,

    /// Fraction of data for test set.
    #[arg(long, default_value_t = 0.1)]
    pub test_ratio: f64,

    /// Learning rate decay factor per epoch.
    #[arg(long, default_value_t = 0.98)]
    pub lr_decay: f64,

    /// Diverging epochs (validation loss above training loss) before early stopping.
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    pub tolerance: i64,

    /// Minimum gap between validation and training loss that counts as diverging.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub min_delta: f32,

    /// Seed for data generation, splitting and shuffling.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Train on the CPU even when an accelerator is available.
    #[arg(long)]
    pub cpu: bool,

    /// Directory the loss history is written to.
    #[arg(long, default_value = "runs")]
    pub out_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["train"]).unwrap();
        assert_eq!(args.image_size, DEFAULT_IMAGE_SIZE);
        assert_eq!(args.tolerance, 5);
        assert_eq!(args.min_delta, 0.0);
        assert!(!args.cpu);
    }

    #[test]
    fn test_negative_stopping_values_reach_the_monitor() {
        let args =
            Args::try_parse_from(["train", "--tolerance", "-1", "--min-delta", "-0.25"]).unwrap();
        assert_eq!(args.tolerance, -1);
        assert_eq!(args.min_delta, -0.25);
    }
}
