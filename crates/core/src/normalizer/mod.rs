//! Normalizer module for resizing downloaded images to the model's input height.

mod error;
mod imagemagick;
mod traits;

pub use error::NormalizeError;
pub use imagemagick::ImageMagickNormalizer;
pub use traits::Normalizer;
