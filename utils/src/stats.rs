use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Training { epoch: usize, epochs: usize },
    Validation,
    Testing,
}

/// Loss and segmentation quality for one pass over a split.
/// Accuracy and IoU are fractions in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    pub loss: f32,
    pub pixel_accuracy: f32,
    pub mean_iou: f32,
}

impl EpochStats {
    pub fn new(loss: f32, pixel_accuracy: f32, mean_iou: f32) -> Self {
        Self {
            loss,
            pixel_accuracy,
            mean_iou,
        }
    }

    pub fn line(&self, phase: Phase) -> String {
        match phase {
            Phase::Training { epoch, epochs } => format!("Epoch {}/{}  Training:   {}", epoch, epochs, self),
            Phase::Validation => format!("Validation: {}", self),
            Phase::Testing => format!("Testing:    {}", self),
        }
    }
}

impl fmt::Display for EpochStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loss={:.2}  pixAcc={:.2}%  mIoU={:.2}%",
            self.loss,
            self.pixel_accuracy * 100.0,
            self.mean_iou * 100.0
        )
    }
}
