use itertools::Itertools;

use crate::distribution::Density;
use crate::error::{Error, Result};
use crate::sampling::Sample;

/// Absorbs one part in 10⁹ of rounding in `span / step`, so a range that is
/// an exact multiple of the step keeps its endpoint.
const SPAN_SLACK: f64 = 1e-9;

#[derive(Clone, Copy, PartialEq, Debug)]
/// A fixed-width discretization of a closed x-range.
pub struct Grid {
    min: f64,
    max: f64,
    step: f64,
}

impl Grid {
    /// # Errors
    /// The bounds must be finite with `min <= max`, and the step positive
    /// and finite.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(Error::InvalidRange { min, max });
        }
        if !step.is_finite() || step <= 0. {
            return Err(Error::InvalidStep(step));
        }
        Ok(Self { min, max, step })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    /// Number of grid points, fixed up front as `floor(span / step) + 1`.
    pub fn len(&self) -> usize {
        ((self.max - self.min) / self.step + SPAN_SLACK) as usize + 1
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    /// The `index`-th grid point, `min + index · step`.
    pub fn x_at(&self, index: usize) -> f64 {
        self.min + index as f64 * self.step
    }

    /// The grid points in increasing order. Lazy, and restartable: each call
    /// yields the full sequence again from scratch.
    pub fn points(self) -> impl Iterator<Item = f64> {
        (0..self.len()).map(move |i| self.x_at(i))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    /// Index of the grid point nearest to `x`, clamped to the grid.
    fn nearest_index(&self, x: f64) -> usize {
        let index = ((x - self.min) / self.step).round();
        index.clamp(0., (self.len() - 1) as f64) as usize
    }
}

#[derive(Clone, PartialEq, Debug)]
/// A density discretized over a [`Grid`] into a normalized cumulative step
/// function.
///
/// Built once per (density, grid) pair and immutable afterwards. The cached
/// values are monotonically non-decreasing and the last one equals 1.0 up to
/// floating-point rounding.
pub struct CumulativeTable {
    grid: Grid,
    values: Vec<f64>,
}

impl CumulativeTable {
    /// Evaluate `density` at every grid point, normalize by the total, and
    /// cache the running sum.
    ///
    /// # Errors
    /// The density values must sum to a positive, finite normalization
    /// constant.
    pub fn build<D: Density>(density: &D, grid: Grid) -> Result<Self> {
        let weights = grid.points().map(|x| density.evaluate(x)).collect_vec();
        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= 0. {
            return Err(Error::DegenerateDensity(total));
        }
        let mut accumulated = 0.;
        let values = weights
            .into_iter()
            .map(|weight| {
                accumulated += weight / total;
                accumulated
            })
            .collect();
        Ok(Self { grid, values })
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    /// Evaluate the step function at `x`: snap to the nearest grid point and
    /// return its cached value. Nearest-neighbor, not linear interpolation.
    pub fn lookup(&self, x: f64) -> f64 {
        self.values[self.grid.nearest_index(x)]
    }

    /// Find the x at which the table comes closest to `target`.
    ///
    /// A single forward scan keeps a best-so-far record and stops as soon as
    /// the error starts growing. This assumes the values are monotonic, so
    /// that the error is unimodal in x; on a non-monotonic table the scan
    /// settles on a local optimum. Equal errors keep the earlier grid point.
    ///
    /// # Errors
    /// An empty table offers no candidates at all.
    pub fn inverse_lookup(&self, target: f64) -> Result<f64> {
        let mut best: Option<(f64, f64)> = None;
        for (x, y) in self.grid.points().zip(self.values.iter().copied()) {
            let delta = (y - target).abs();
            match best {
                None => best = Some((x, delta)),
                Some((_, best_delta)) if delta < best_delta => best = Some((x, delta)),
                Some((_, best_delta)) if delta > best_delta => break,
                Some(_) => {}
            }
        }
        best.map(|(x, _)| x).ok_or(Error::EmptyScan)
    }

    /// `(x, y)` samples of the cached cumulative values, in grid order.
    /// Restartable: each call replays the sequence from the start.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.grid
            .points()
            .zip(self.values.iter().copied())
            .map(|(x, y)| Sample { x, y })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::{CumulativeTable, Grid};
    use crate::distribution::gaussian::Gaussian;
    use crate::error::Error;

    fn canonical_grid() -> Grid {
        Grid::new(-4., 4., 0.02).unwrap()
    }

    fn standard_table() -> CumulativeTable {
        let standard = Gaussian::new(0., 1.).unwrap();
        CumulativeTable::build(&standard, canonical_grid()).unwrap()
    }

    #[test]
    fn grid_keeps_its_endpoint() {
        let grid = canonical_grid();
        assert_eq!(grid.len(), 401);
        let points = grid.points().collect_vec();
        assert_abs_diff_eq!(points[0], -4.);
        assert_abs_diff_eq!(points[400], 4., epsilon = 1e-9);
    }

    #[test]
    fn grid_points_restart_from_scratch() {
        let grid = canonical_grid();
        assert_eq!(grid.points().collect_vec(), grid.points().collect_vec());
    }

    #[test]
    fn grid_rejects_invalid_parameters() {
        assert!(matches!(
            Grid::new(1., 0., 0.1),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            Grid::new(f64::NAN, 0., 0.1),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(Grid::new(0., 1., 0.), Err(Error::InvalidStep(_))));
        assert!(matches!(Grid::new(0., 1., -0.1), Err(Error::InvalidStep(_))));
    }

    #[test]
    fn table_is_monotone_and_ends_at_unity() {
        let table = standard_table();
        assert_eq!(table.len(), 401);
        assert!(table.values().windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(table.values()[0] >= 0.);
        assert_abs_diff_eq!(*table.values().last().unwrap(), 1., epsilon = 1e-6);
    }

    #[test]
    fn lookup_hits_the_boundaries() {
        let table = standard_table();
        let grid = table.grid();
        assert_abs_diff_eq!(table.lookup(grid.min()), table.values()[0]);
        assert_abs_diff_eq!(table.lookup(grid.max()), *table.values().last().unwrap());
        // Out-of-range queries clamp to the boundary entries.
        assert_abs_diff_eq!(table.lookup(-100.), table.values()[0]);
        assert_abs_diff_eq!(table.lookup(100.), *table.values().last().unwrap());
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(standard_table(), standard_table());
    }

    #[test]
    fn degenerate_densities_are_rejected() {
        let grid = canonical_grid();
        let zero = |_: f64| 0.;
        assert!(matches!(
            CumulativeTable::build(&zero, grid),
            Err(Error::DegenerateDensity(_))
        ));
        let undefined = |_: f64| f64::NAN;
        assert!(matches!(
            CumulativeTable::build(&undefined, grid),
            Err(Error::DegenerateDensity(_))
        ));
    }

    #[test]
    fn median_of_symmetric_density_is_centered() {
        let table = standard_table();
        let median = table.inverse_lookup(0.5).unwrap();
        assert!(median.abs() <= table.grid().step() + 1e-9);
    }

    #[test]
    fn single_point_grid_still_normalizes() {
        let grid = Grid::new(2., 2., 0.5).unwrap();
        let spike = |_: f64| 3.;
        let table = CumulativeTable::build(&spike, grid).unwrap();
        assert_eq!(table.len(), 1);
        assert_abs_diff_eq!(table.lookup(7.), 1.);
        assert_abs_diff_eq!(table.inverse_lookup(0.3).unwrap(), 2.);
    }

    #[test]
    fn inverse_lookup_stops_at_a_local_optimum() {
        let grid = Grid::new(0., 3., 1.).unwrap();
        let table = CumulativeTable {
            grid,
            values: vec![0., 0.4, 0.2, 0.9],
        };
        // The scan improves at 0.4, worsens at 0.2, and exits before ever
        // seeing the exact match at the last point.
        assert_abs_diff_eq!(table.inverse_lookup(0.9).unwrap(), 1.);
    }

    #[test]
    fn inverse_lookup_ties_keep_the_earlier_point() {
        let grid = Grid::new(0., 2., 1.).unwrap();
        let table = CumulativeTable {
            grid,
            values: vec![0.2, 0.2, 1.],
        };
        assert_abs_diff_eq!(table.inverse_lookup(0.2).unwrap(), 0.);
    }

    #[test]
    fn concurrent_builds_agree() {
        let reference = standard_table();
        std::thread::scope(|scope| {
            let workers = (0..4)
                .map(|_| scope.spawn(standard_table))
                .collect_vec();
            for worker in workers {
                assert_eq!(worker.join().unwrap(), reference);
            }
        });
    }
}
