#![warn(clippy::pedantic)]
#![allow(
    clippy::len_without_is_empty,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

//! Numeric core behind statistical chart demos: Gaussian probability
//! densities, discretized cumulative distribution tables, and the box-plot
//! quartile summaries derived from them.
//!
//! Rendering, styling, and delivery pacing belong to the plotting layer;
//! this crate only produces the sample sequences and summary scalars that
//! the plotting layer consumes.

pub mod cumulative;
pub mod distribution;
pub mod error;
pub mod sampling;
pub mod summary;

pub use cumulative::{CumulativeTable, Grid};
pub use distribution::gaussian::Gaussian;
pub use distribution::Density;
pub use error::{Error, Result};
pub use sampling::{curve, violin_band, BandSample, Sample};
pub use summary::Quartiles;
