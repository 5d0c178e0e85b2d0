use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const DEFAULT_IMAGE_SIZE: usize = 8;

const BACKGROUND_MAX: f32 = 0.4;
const FOREGROUND_MIN: f32 = 0.6;

/// A square grayscale image with its binary foreground mask, both row-major.
#[derive(Clone, Debug)]
pub struct Sample {
    pub image: Vec<f32>,
    pub mask: Vec<f32>,
}

impl Sample {
    /// One bright rectangle on a noisy dark background
    fn random<R: Rng>(rng: &mut R, size: usize) -> Self {
        let width = rng.gen_range(1..=size.div_ceil(2));
        let height = rng.gen_range(1..=size.div_ceil(2));
        let left = rng.gen_range(0..=size - width);
        let top = rng.gen_range(0..=size - height);

        let mut image = Vec::with_capacity(size * size);
        let mut mask = Vec::with_capacity(size * size);

        for row in 0..size {
            for col in 0..size {
                let inside = (top..top + height).contains(&row) && (left..left + width).contains(&col);
                if inside {
                    image.push(rng.gen_range(FOREGROUND_MIN..1.0));
                    mask.push(1.0);
                } else {
                    image.push(rng.gen_range(0.0..BACKGROUND_MAX));
                    mask.push(0.0);
                }
            }
        }

        Self { image, mask }
    }
}

#[derive(Clone, Debug)]
pub struct Samples {
    pub samples: Vec<Sample>,
    image_size: usize,
}

impl Samples {
    pub fn generate(count: usize, image_size: usize, seed: u64) -> Self {
        let image_size = image_size.max(1);
        let mut rng = StdRng::seed_from_u64(seed);

        let samples = (0..count)
            .map(|_| Sample::random(&mut rng, image_size))
            .collect();

        Self {
            samples,
            image_size,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn image_size(&self) -> usize {
        self.image_size
    }

    pub fn pixels(&self) -> usize {
        self.image_size * self.image_size
    }

    /// Shuffles and partitions into (train, val, test).
    pub fn split(mut self, val_ratio: f64, test_ratio: f64, seed: u64) -> (Self, Self, Self) {
        self.samples.shuffle(&mut StdRng::seed_from_u64(seed));

        let total = self.samples.len();
        let num_test = ((total as f64 * test_ratio.clamp(0.0, 1.0)) as usize).min(total);
        let num_val = ((total as f64 * val_ratio.clamp(0.0, 1.0)) as usize).min(total - num_test);

        let mut train = self.samples;
        let mut rest = train.split_off(total - num_test - num_val);
        let test = rest.split_off(num_val);

        let size = self.image_size;
        (
            Self { samples: train, image_size: size },
            Self { samples: rest, image_size: size },
            Self { samples: test, image_size: size },
        )
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.samples.shuffle(rng);
    }

    /// Flattened `(images, masks)` batches of `batch_len * pixels` values each.
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = (Vec<f32>, Vec<f32>)> + '_ {
        let pixels = self.pixels();
        self.samples.chunks(batch_size.max(1)).map(move |chunk| {
            let mut images = Vec::with_capacity(chunk.len() * pixels);
            let mut masks = Vec::with_capacity(chunk.len() * pixels);
            for sample in chunk {
                images.extend_from_slice(&sample.image);
                masks.extend_from_slice(&sample.mask);
            }
            (images, masks)
        })
    }

    pub fn num_batches(&self, batch_size: usize) -> usize {
        self.samples.len().div_ceil(batch_size.max(1))
    }
}
