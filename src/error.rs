//! Error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeError {
    /// A grid dimension is zero.
    #[error("invalid bounds {width}x{height}: both dimensions must be at least 1")]
    InvalidBounds { width: usize, height: usize },

    /// A live cell lies outside the grid.
    #[error("live cell ({x}, {y}) outside {width}x{height} grid")]
    MalformedLiveSet {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Seed probability not in [0, 1].
    #[error("seed chance must be within [0, 1], got {0}")]
    InvalidChance(f64),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
