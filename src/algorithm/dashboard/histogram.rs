//! Equal-width histogram of length of stay

use serde::Serialize;

use crate::models::visit::Visit;

/// One histogram bin, `[lower, upper)`; the last bin also holds `upper`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge, inclusive only for the last bin
    pub upper: f64,
    /// Values falling in the bin
    pub count: usize,
}

/// Histogram over the observed range of the values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bins in ascending order
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bucket `values` into `bins` equal-width bins spanning their min and max
    ///
    /// No values (or zero bins) give an empty histogram. When every value is
    /// equal the range is widened by half a unit either side.
    #[must_use]
    pub fn equal_width(values: &[f64], bins: usize) -> Self {
        let Some((mut min, mut max)) = bounds(values) else {
            return Self { bins: Vec::new() };
        };
        if bins == 0 {
            return Self { bins: Vec::new() };
        }
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for &value in values {
            let idx = ((value - min) / width).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(idx, count)| HistogramBin {
                lower: min + width * idx as f64,
                upper: if idx + 1 == bins { max } else { min + width * (idx + 1) as f64 },
                count,
            })
            .collect();
        Self { bins }
    }

    /// Total number of values counted
    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Whether the histogram has no bins
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
    })
}

/// Length-of-stay histogram of a filtered set
#[must_use]
pub fn length_of_stay_histogram(visits: &[Visit], bins: usize) -> Histogram {
    let values: Vec<f64> = visits
        .iter()
        .map(|v| f64::from(v.length_of_stay_min))
        .collect();
    Histogram::equal_width(&values, bins)
}
