use crate::cumulative::CumulativeTable;
use crate::error::Result;

#[derive(Clone, Copy, PartialEq, Debug)]
/// The five box-and-whisker scalars of a distribution.
pub struct Quartiles {
    pub lower_extreme: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub upper_extreme: f64,
}

impl Quartiles {
    /// Whisker reach in IQRs beyond the quartiles (Tukey's fence).
    pub const FENCE_FACTOR: f64 = 1.5;

    /// Derive the summary from a cumulative table: the quartiles are the x
    /// positions where the table reaches 1/4, 1/2, and 3/4, and the extremes
    /// sit [`Self::FENCE_FACTOR`] IQRs beyond them. The extremes are never
    /// clamped to the sampled range and may fall outside it.
    ///
    /// # Errors
    /// Propagates the no-result error of an inverse lookup over an empty
    /// table.
    pub fn from_table(table: &CumulativeTable) -> Result<Self> {
        let lower_quartile = table.inverse_lookup(0.25)?;
        let median = table.inverse_lookup(0.50)?;
        let upper_quartile = table.inverse_lookup(0.75)?;
        let iqr = upper_quartile - lower_quartile;
        Ok(Self {
            lower_extreme: lower_quartile - Self::FENCE_FACTOR * iqr,
            lower_quartile,
            median,
            upper_quartile,
            upper_extreme: upper_quartile + Self::FENCE_FACTOR * iqr,
        })
    }

    #[must_use]
    /// The interquartile range.
    pub fn iqr(&self) -> f64 {
        self.upper_quartile - self.lower_quartile
    }

    #[must_use]
    /// The five values in ascending order, ready to hand to a box series.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.lower_extreme,
            self.lower_quartile,
            self.median,
            self.upper_quartile,
            self.upper_extreme,
        ]
    }
}
