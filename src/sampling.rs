use crate::cumulative::Grid;
use crate::distribution::Density;

/// Density samples below this height contribute no visible area and are
/// dropped from violin bands.
pub const MIN_BAND_DENSITY: f64 = 1e-3;

#[derive(Clone, Copy, PartialEq, Debug)]
/// An `(x, y)` point handed to the plotting layer.
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
/// An `(x, low, high)` region point, one slice of a band series.
pub struct BandSample {
    pub x: f64,
    pub low: f64,
    pub high: f64,
}

/// Sample a density over a grid. Lazy, and restartable: the density is
/// re-evaluated from scratch on every call, so the plotting layer can layer
/// any delivery pacing on top.
pub fn curve<D: Density>(grid: Grid, density: &D) -> impl Iterator<Item = Sample> + '_ {
    grid.points().map(move |x| Sample {
        x,
        y: density.evaluate(x),
    })
}

/// Mirror a density around `baseline` into an `(x, low, high)` band half the
/// density high on each side. Points below [`MIN_BAND_DENSITY`] are omitted
/// entirely rather than emitted as zero-height slices.
pub fn violin_band<D: Density>(
    grid: Grid,
    density: &D,
    baseline: f64,
) -> impl Iterator<Item = BandSample> + '_ {
    curve(grid, density)
        .filter(|sample| sample.y >= MIN_BAND_DENSITY)
        .map(move |sample| BandSample {
            x: sample.x,
            low: baseline - sample.y / 2.,
            high: baseline + sample.y / 2.,
        })
}
