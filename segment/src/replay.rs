use stopping::EarlyStopping;

use crate::history::LossHistory;

/// Feeds a recorded run through `monitor` epoch by epoch.
///
/// Returns the epoch number at which the monitor first asked to stop, or
/// `None` if the run would have completed.
pub fn replay(history: &LossHistory, monitor: &mut EarlyStopping) -> Option<usize> {
    for record in &history.records {
        monitor.evaluate(record.train_loss, record.val_loss);
        log::debug!(
            "Epoch {}: train {:.5}, val {:.5}, diverging epochs {}",
            record.epoch,
            record.train_loss,
            record.val_loss,
            monitor.counter()
        );

        if monitor.should_stop() {
            return Some(record.epoch);
        }
    }

    None
}
