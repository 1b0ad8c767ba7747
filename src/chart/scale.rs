// Scales - value domains and pixel mapping
use crate::domain::chart::SeriesConfig;
use crate::domain::sample::Sample;

/// Floor for percentage-style charts.
pub const PERCENT_FLOOR: f64 = 100.0;
/// Floor for count-style charts.
pub const COUNT_FLOOR: f64 = 1.0;

/// Value range of a chart's vertical axis. `min` is always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    /// Domain over every series value of every sample, never below `floor`.
    ///
    /// Returns `None` for an empty sample list; callers render the empty
    /// state instead.
    pub fn from_samples(samples: &[Sample], series: &[SeriesConfig], floor: f64) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let observed = samples
            .iter()
            .flat_map(|sample| series.iter().map(move |s| s.value_of(sample)))
            .fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            min: 0.0,
            max: observed.max(floor),
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Evenly spaced values from `min` to `max`, `divisions + 1` of them.
    pub fn levels(&self, divisions: usize) -> impl Iterator<Item = f64> + '_ {
        (0..=divisions).map(move |i| self.min + self.span() * i as f64 / divisions as f64)
    }
}

/// Linear value-to-pixel mapping. With `range = (bottom, top)` larger values
/// land on smaller y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Domain,
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Vertical scale for a plot spanning `top..bottom` in pixels.
    pub fn vertical(domain: Domain, top: f64, bottom: f64) -> Self {
        Self::new(domain, (bottom, top))
    }

    pub fn map(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        let res = r0 + (value - self.domain.min) / self.domain.span() * (r1 - r0);
        if res.is_nan() || res.is_infinite() {
            r0
        } else {
            res
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Spreads `count` sample indices evenly across a horizontal pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexScale {
    count: usize,
    range: (f64, f64),
}

impl IndexScale {
    /// `None` when fewer than two samples exist: the step divides by `count - 1`.
    pub fn new(count: usize, range: (f64, f64)) -> Option<Self> {
        (count >= 2).then_some(Self { count, range })
    }

    pub fn map(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        r0 + index as f64 / (self.count - 1) as f64 * (r1 - r0)
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
