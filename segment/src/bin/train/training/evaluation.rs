use candle_core::{Device, Tensor};
use candle_nn::Module;
use segment::loss::bce_with_logits;
use segment::metrics::MetricsAccumulator;
use segment::network::Network;
use segment::samples::Samples;
use std::error::Error;
use utils::EpochStats;

pub fn evaluate(
    network: &Network,
    samples: &Samples,
    batch_size: usize,
    device: &Device,
) -> Result<EpochStats, Box<dyn Error>> {
    let pixels = samples.pixels();
    let mut metrics = MetricsAccumulator::new();

    for (images, masks) in samples.batches(batch_size) {
        let batch_len = masks.len() / pixels;
        if batch_len == 0 {
            continue;
        }

        let x = Tensor::from_vec(images, (batch_len, pixels), device)?;
        let y = Tensor::from_slice(&masks, (batch_len, pixels), device)?;

        let logits = network.forward(&x)?;
        let loss = bce_with_logits(&logits, &y)?;

        metrics.add_loss(loss.to_vec0::<f32>()?);
        metrics.update(&logits.flatten_all()?.to_vec1::<f32>()?, &masks);
    }

    Ok(metrics.stats())
}
