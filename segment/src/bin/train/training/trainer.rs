use candle_core::{DType, Device, Tensor};
use candle_nn::{AdamW, Module, Optimizer, ParamsAdamW, VarBuilder, VarMap};
use rand::rngs::StdRng;
use rand::SeedableRng;
use segment::history::{EpochRecord, LossHistory};
use segment::loss::bce_with_logits;
use segment::metrics::MetricsAccumulator;
use segment::network::Network;
use segment::samples::Samples;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use stopping::EarlyStopping;
use utils::{EpochStats, Phase};

use crate::args::Args;
use crate::training::evaluation::evaluate;
use crate::training::progress::EpochProgress;

pub struct Trainer {
    network: Network,
    optimizer: AdamW,
    device: Device,
    monitor: EarlyStopping,
    rng: StdRng,
    pixels: usize,
    batch_size: usize,
    epochs: usize,
    lr_decay: f64,
}

impl Trainer {
    pub fn new(args: &Args, pixels: usize) -> Result<Self, Box<dyn Error>> {
        let monitor = EarlyStopping::new(args.tolerance, args.min_delta)?;

        let device = select_device(args.cpu)?;
        log::info!("Training on {:?} with {} pixels per image", device, pixels);

        let varmap = VarMap::new();
        let vs = VarBuilder::from_varmap(&varmap, DType::F32, &device);
        let network = Network::new(&vs, pixels)?;
        let optimizer = AdamW::new(
            varmap.all_vars(),
            ParamsAdamW {
                lr: args.learning_rate,
                ..Default::default()
            },
        )?;

        Ok(Self {
            network,
            optimizer,
            device,
            monitor,
            rng: StdRng::seed_from_u64(args.seed),
            pixels,
            batch_size: args.batch_size,
            epochs: args.epochs,
            lr_decay: args.lr_decay,
        })
    }

    pub fn train(
        &mut self,
        train: &mut Samples,
        val: &Samples,
        test: &Samples,
        stop_flag: &AtomicBool,
    ) -> Result<LossHistory, Box<dyn Error>> {
        let mut history = LossHistory::new();

        for epoch in 1..=self.epochs {
            train.shuffle(&mut self.rng);

            let progress = EpochProgress::new(epoch, train.num_batches(self.batch_size))?;
            let train_stats = self.train_epoch(train, &progress)?;
            let val_stats = evaluate(&self.network, val, self.batch_size, &self.device)?;
            progress.finish(&train_stats, &val_stats);

            log::info!(
                "{}",
                train_stats.line(Phase::Training {
                    epoch,
                    epochs: self.epochs
                })
            );
            log::info!("{}", val_stats.line(Phase::Validation));

            history.push(EpochRecord {
                epoch,
                train_loss: train_stats.loss,
                val_loss: val_stats.loss,
                pixel_accuracy: val_stats.pixel_accuracy,
                mean_iou: val_stats.mean_iou,
            });

            self.monitor.evaluate(train_stats.loss, val_stats.loss);
            if self.monitor.should_stop() {
                log::info!("Early stopping after {} epochs", epoch);
                break;
            }

            if stop_flag.load(Ordering::Relaxed) {
                log::info!("Interrupted after {} epochs", epoch);
                break;
            }

            self.decay_learning_rate();
        }

        self.test_model(test)?;

        Ok(history)
    }

    fn train_epoch(
        &mut self,
        train: &Samples,
        progress: &EpochProgress,
    ) -> Result<EpochStats, Box<dyn Error>> {
        let mut metrics = MetricsAccumulator::new();

        for (images, masks) in train.batches(self.batch_size) {
            let batch_len = masks.len() / self.pixels;
            if batch_len == 0 {
                continue;
            }

            let x = Tensor::from_vec(images, (batch_len, self.pixels), &self.device)?;
            let y = Tensor::from_slice(&masks, (batch_len, self.pixels), &self.device)?;

            let logits = self.network.forward(&x)?;
            let loss = bce_with_logits(&logits, &y)?;

            self.optimizer.backward_step(&loss)?;

            metrics.add_loss(loss.to_vec0::<f32>()?);
            metrics.update(&logits.flatten_all()?.to_vec1::<f32>()?, &masks);
            progress.update(&metrics);
        }

        Ok(metrics.stats())
    }

    fn decay_learning_rate(&mut self) {
        let current_lr = self.optimizer.learning_rate();
        let new_lr = current_lr * self.lr_decay;
        self.optimizer.set_learning_rate(new_lr);
    }

    fn test_model(&self, test: &Samples) -> Result<EpochStats, Box<dyn Error>> {
        if test.is_empty() {
            log::warn!("Test set is empty, skipping final evaluation");
            return Ok(EpochStats::new(0.0, 0.0, 0.0));
        }

        log::info!("Running final test set evaluation...");
        let stats = evaluate(&self.network, test, self.batch_size, &self.device)?;
        log::info!("{}", stats.line(Phase::Testing));

        Ok(stats)
    }
}

/// Picks an accelerator compiled in through the `cuda` / `metal` features,
/// falling back to the CPU when none is usable or `force_cpu` is set.
fn select_device(force_cpu: bool) -> Result<Device, Box<dyn Error>> {
    if force_cpu {
        return Ok(Device::Cpu);
    }

    #[cfg(feature = "cuda")]
    if let Ok(device) = Device::cuda_if_available(0) {
        if device.is_cuda() {
            return Ok(device);
        }
    }

    #[cfg(feature = "metal")]
    if let Ok(device) = Device::new_metal(0) {
        if device.is_metal() {
            return Ok(device);
        }
    }

    Ok(Device::Cpu)
}
