use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::EarlyStopping;

const TRAIN_LOSS: f32 = 1.0;

/// Validation loss that lands strictly above the divergence threshold
fn diverging(rng: &mut StdRng, min_delta: f32) -> f32 {
    TRAIN_LOSS + min_delta + rng.gen_range(0.01..1.0)
}

/// Validation loss at or below the divergence threshold
fn steady(rng: &mut StdRng, min_delta: f32) -> f32 {
    TRAIN_LOSS + min_delta - rng.gen_range(0.01..2.0)
}

#[test]
fn test_reference_scenario() {
    let mut monitor = EarlyStopping::new(3, 0.1).unwrap();
    let epochs = [(1.0, 1.05), (1.0, 1.2), (1.0, 1.3), (1.0, 1.0), (1.0, 1.15)];
    let expected = [false, false, false, false, true];

    for ((train, val), stop) in epochs.iter().zip(expected) {
        monitor.evaluate(*train, *val);
        assert_eq!(monitor.should_stop(), stop, "train={} val={}", train, val);
    }
    assert_eq!(monitor.counter(), 3);
}

#[test]
fn test_stops_exactly_on_tolerance() {
    let mut rng = StdRng::seed_from_u64(7);

    for tolerance in 1..=8 {
        for &min_delta in &[0.0f32, 0.05, 0.5] {
            let mut monitor = EarlyStopping::new(tolerance, min_delta).unwrap();

            for epoch in 1..=tolerance {
                assert!(!monitor.should_stop());
                monitor.evaluate(TRAIN_LOSS, diverging(&mut rng, min_delta));
                assert_eq!(monitor.should_stop(), epoch == tolerance);
            }

            // Stays stopped whatever comes next
            for _ in 0..5 {
                monitor.evaluate(TRAIN_LOSS, steady(&mut rng, min_delta));
                assert!(monitor.should_stop());
                monitor.evaluate(TRAIN_LOSS, diverging(&mut rng, min_delta));
                assert!(monitor.should_stop());
            }
        }
    }
}

#[test]
fn test_interleaved_steady_epochs_never_stop_below_tolerance() {
    let mut rng = StdRng::seed_from_u64(11);

    for tolerance in 2..=6 {
        let min_delta = 0.1;
        let mut monitor = EarlyStopping::new(tolerance, min_delta).unwrap();

        for _ in 0..tolerance - 1 {
            for _ in 0..rng.gen_range(0..5) {
                monitor.evaluate(TRAIN_LOSS, steady(&mut rng, min_delta));
                assert!(!monitor.should_stop());
            }
            monitor.evaluate(TRAIN_LOSS, diverging(&mut rng, min_delta));
            assert!(!monitor.should_stop());
        }

        for _ in 0..20 {
            monitor.evaluate(TRAIN_LOSS, steady(&mut rng, min_delta));
        }
        assert!(!monitor.should_stop());
        assert_eq!(monitor.counter(), (tolerance - 1) as u64);

        monitor.evaluate(TRAIN_LOSS, diverging(&mut rng, min_delta));
        assert!(monitor.should_stop());
    }
}

#[test]
fn test_counter_is_cumulative_across_recovery() {
    let mut monitor = EarlyStopping::new(2, 0.0).unwrap();

    monitor.evaluate(0.5, 0.9);
    // Validation loss recovers well below train loss
    monitor.evaluate(0.5, 0.1);
    monitor.evaluate(0.5, 0.2);
    assert_eq!(monitor.counter(), 1);

    monitor.evaluate(0.4, 0.6);
    assert!(monitor.should_stop());
}

#[test]
fn test_should_stop_is_idempotent() {
    let mut monitor = EarlyStopping::new(2, 0.0).unwrap();
    monitor.evaluate(0.0, 1.0);

    let first = monitor.should_stop();
    for _ in 0..10 {
        assert_eq!(monitor.should_stop(), first);
    }
    assert_eq!(monitor.counter(), 1);

    monitor.evaluate(0.0, 1.0);
    for _ in 0..10 {
        assert!(monitor.should_stop());
    }
}

#[test]
fn test_negative_losses_are_accepted() {
    let mut monitor = EarlyStopping::new(1, 0.0).unwrap();
    monitor.evaluate(-3.0, -2.5);
    assert!(monitor.should_stop());
}
