use candle_core::{Result, Tensor};
use candle_nn::{linear, Linear, Module, VarBuilder};

pub const HIDDEN_SIZE: usize = 128;

/// Per-image MLP mapping every pixel to a foreground logit.
pub struct Network {
    input: Linear,
    hidden: Linear,
    output: Linear,
}

impl Network {
    pub fn new(vs: &VarBuilder, pixels: usize) -> Result<Self> {
        let network = Self {
            input: linear(pixels, HIDDEN_SIZE, vs.pp("input"))?,
            hidden: linear(HIDDEN_SIZE, HIDDEN_SIZE, vs.pp("hidden"))?,
            output: linear(HIDDEN_SIZE, pixels, vs.pp("output"))?,
        };

        Ok(network)
    }
}

impl Module for Network {
    #[inline]
    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let x = x.apply(&self.input)?.relu()?;
        let x = x.apply(&self.hidden)?.relu()?;

        // Raw logits, one per pixel
        x.apply(&self.output)
    }
}
