use candle_core::{Result, Tensor};

/// Binary cross-entropy on raw logits, averaged over every element.
///
/// Uses `max(x, 0) - x * y + ln(1 + e^-|x|)` so large logits do not overflow.
pub fn bce_with_logits(logits: &Tensor, targets: &Tensor) -> Result<Tensor> {
    let positive = logits.relu()?;
    let product = (logits * targets)?;
    let softplus = logits.abs()?.neg()?.exp()?.affine(1.0, 1.0)?.log()?;

    let loss = ((positive - product)? + softplus)?;
    loss.mean_all()
}
