use crate::error::ConfigError;

pub const DEFAULT_TOLERANCE: i64 = 5;
pub const DEFAULT_MIN_DELTA: f32 = 0.0;

/// Flags a training run for stopping once validation loss has diverged from
/// training loss often enough.
///
/// An epoch qualifies when `validation_loss - train_loss > min_delta`. Qualifying
/// epochs are counted over the whole run and the counter is never reset, so a
/// run that recovers between divergent epochs still spends its tolerance.
/// Once `tolerance` qualifying epochs have been seen the monitor stays stopped.
#[derive(Debug, Clone)]
pub struct EarlyStopping {
    tolerance: u64,
    min_delta: f32,
    counter: u64,
    stopped: bool,
}

impl EarlyStopping {
    pub fn new(tolerance: i64, min_delta: f32) -> Result<Self, ConfigError> {
        if tolerance <= 0 {
            return Err(ConfigError::InvalidConfiguration { tolerance });
        }

        Ok(Self {
            tolerance: tolerance as u64,
            min_delta,
            counter: 0,
            stopped: false,
        })
    }

    /// Records one completed epoch. Call once per epoch, in epoch order.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn evaluate(&mut self, train_loss: f32, validation_loss: f32) {
        let gap = validation_loss - train_loss;
        // NaN on either side never qualifies
        if !(gap > self.min_delta) {
            return;
        }

        self.counter += 1;
        if self.counter >= self.tolerance {
            self.stopped = true;
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn counter(&self) -> u64 {
        self.counter
    }

    #[inline]
    pub fn tolerance(&self) -> u64 {
        self.tolerance
    }

    #[inline]
    pub fn min_delta(&self) -> f32 {
        self.min_delta
    }
}

impl Default for EarlyStopping {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE as u64,
            min_delta: DEFAULT_MIN_DELTA,
            counter: 0,
            stopped: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_clear() {
        let monitor = EarlyStopping::new(3, 0.1).unwrap();
        assert_eq!(monitor.counter(), 0);
        assert_eq!(monitor.tolerance(), 3);
        assert_eq!(monitor.min_delta(), 0.1);
        assert!(!monitor.should_stop());
    }

    #[test]
    fn test_default_matches_constants() {
        let monitor = EarlyStopping::default();
        assert_eq!(monitor.tolerance(), 5);
        assert_eq!(monitor.min_delta(), 0.0);
        assert!(!monitor.should_stop());
    }

    #[test]
    fn test_rejects_non_positive_tolerance() {
        assert_eq!(
            EarlyStopping::new(0, 0.0).unwrap_err(),
            ConfigError::InvalidConfiguration { tolerance: 0 }
        );
        assert_eq!(
            EarlyStopping::new(-2, 0.0).unwrap_err(),
            ConfigError::InvalidConfiguration { tolerance: -2 }
        );
    }

    #[test]
    fn test_gap_equal_to_min_delta_does_not_count() {
        let mut monitor = EarlyStopping::new(1, 0.5).unwrap();
        monitor.evaluate(1.0, 1.5);
        assert_eq!(monitor.counter(), 0);
        assert!(!monitor.should_stop());

        monitor.evaluate(1.0, 1.75);
        assert_eq!(monitor.counter(), 1);
        assert!(monitor.should_stop());
    }

    #[test]
    fn test_nan_losses_are_ignored() {
        let mut monitor = EarlyStopping::new(1, 0.0).unwrap();
        monitor.evaluate(f32::NAN, 1.0);
        monitor.evaluate(1.0, f32::NAN);
        assert_eq!(monitor.counter(), 0);
        assert!(!monitor.should_stop());
    }

    #[test]
    fn test_nan_min_delta_never_qualifies() {
        let mut monitor = EarlyStopping::new(1, f32::NAN).unwrap();
        monitor.evaluate(1.0, 0.0);
        monitor.evaluate(0.0, 10.0);
        assert_eq!(monitor.counter(), 0);
        assert!(!monitor.should_stop());
    }

    #[test]
    fn test_counter_keeps_growing_after_stop() {
        let mut monitor = EarlyStopping::new(1, 0.0).unwrap();
        monitor.evaluate(0.0, 1.0);
        monitor.evaluate(0.0, 1.0);
        assert_eq!(monitor.counter(), 2);
        assert!(monitor.should_stop());
    }
}
