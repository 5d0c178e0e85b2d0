use utils::EpochStats;

const NUM_CLASSES: usize = 2;

/// Running confusion counts for binary segmentation.
///
/// A pixel is predicted foreground when its logit is positive and is truly
/// foreground when its mask value is above one half.
#[derive(Debug, Default, Clone)]
pub struct MetricsAccumulator {
    correct: u64,
    total: u64,
    intersection: [u64; NUM_CLASSES],
    union: [u64; NUM_CLASSES],
    loss_sum: f32,
    batches: usize,
}

impl MetricsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, logits: &[f32], masks: &[f32]) {
        for (&logit, &mask) in logits.iter().zip(masks) {
            let predicted = (logit > 0.0) as usize;
            let truth = (mask > 0.5) as usize;

            self.total += 1;
            if predicted == truth {
                self.correct += 1;
                self.intersection[truth] += 1;
                self.union[truth] += 1;
            } else {
                self.union[predicted] += 1;
                self.union[truth] += 1;
            }
        }
    }

    pub fn add_loss(&mut self, loss: f32) {
        self.loss_sum += loss;
        self.batches += 1;
    }

    /// Mean of the per-batch losses
    pub fn loss(&self) -> f32 {
        self.loss_sum / self.batches.max(1) as f32
    }

    pub fn pixel_accuracy(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f32 / self.total as f32
    }

    /// Classes absent from both prediction and truth are left out of the mean.
    pub fn mean_iou(&self) -> f32 {
        let ious: Vec<f32> = self
            .intersection
            .iter()
            .zip(&self.union)
            .filter(|&(_, &union)| union > 0)
            .map(|(&inter, &union)| inter as f32 / union as f32)
            .collect();

        if ious.is_empty() {
            return 1.0;
        }
        ious.iter().sum::<f32>() / ious.len() as f32
    }

    pub fn stats(&self) -> EpochStats {
        EpochStats::new(self.loss(), self.pixel_accuracy(), self.mean_iou())
    }
}
