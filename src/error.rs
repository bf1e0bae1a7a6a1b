use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Debug, Error)]
pub enum Error {
    /// The density formula is undefined for a non-positive scale.
    #[error("distribution scale must be positive and finite, got {0}")]
    InvalidScale(f64),
    #[error("grid range [{min}, {max}] is inverted or non-finite")]
    InvalidRange { min: f64, max: f64 },
    #[error("grid step must be positive and finite, got {0}")]
    InvalidStep(f64),
    /// The sampled density cannot be normalized into a distribution.
    #[error("density values sum to {0}, which cannot normalize a distribution")]
    DegenerateDensity(f64),
    /// An inverse lookup examined no candidate points at all.
    #[error("inverse lookup over an empty table has no result")]
    EmptyScan,
}

pub type Result<T> = std::result::Result<T, Error>;
