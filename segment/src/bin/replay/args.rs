use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "Early Stopping Replay")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Loss history CSV written by the trainer.
    pub history: String,

    /// Diverging epochs (validation loss above training loss) before early stopping.
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    pub tolerance: i64,

    /// Minimum gap between validation and training loss that counts as diverging.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub min_delta: f32,

    /// Log every epoch, not just the outcome.
    #[arg(long)]
    pub verbose: bool,
}
