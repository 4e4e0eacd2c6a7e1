use super::BinSet;

/// Speed classification: linear bins with an uneven first bin.
///
/// The first bin covers `[0, first_bin_width)`; every further bin is
/// `other_bin_width` wide, except the terminal bin which is open-ended. All
/// widths are stored in km/h; the declared display units apply only at the
/// text boundary.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedClassification {
    /// Short scheme name written to the `TS` record.
    pub name: String,
    /// Width of bin 0 in km/h. May differ from `other_bin_width`.
    pub first_bin_width: f64,
    /// Width of every bin after the first, in km/h.
    pub other_bin_width: f64,
    /// Index of the terminal bin; the record carries `maximum_bin + 1` counts.
    pub maximum_bin: u16,
}

impl SpeedClassification {
    /// Create a recording speed classification.
    pub fn new(name: &str, first_bin_width: f64, other_bin_width: f64, maximum_bin: u16) -> Self {
        SpeedClassification {
            name: name.into(),
            first_bin_width,
            other_bin_width,
            maximum_bin,
        }
    }

    /// Bin index for a speed in km/h.
    ///
    /// Returns 0 when the step width is non-positive or the speed falls below
    /// the first bin boundary; otherwise the linear bin, clamped into the
    /// open-ended terminal bin.
    pub fn bin(&self, kph: f64) -> usize {
        if self.other_bin_width <= 0.0 || kph < self.first_bin_width {
            return 0;
        }
        let bin = ((kph - self.first_bin_width) / self.other_bin_width) as usize + 1;
        bin.min(self.maximum_bin as usize)
    }

    /// Inclusive lower speed bound of a bin, in km/h.
    pub fn bin_lower(&self, bin: usize) -> f64 {
        if bin == 0 {
            0.0
        } else {
            self.first_bin_width + self.other_bin_width * (bin as f64 - 1.0)
        }
    }

    /// Exclusive upper speed bound of a bin, in km/h.
    ///
    /// The terminal bin is conceptually unbounded, but this applies the same
    /// linear formula as for interior bins and therefore yields a finite
    /// value for it as well. [`mean_speed`](Self::mean_speed) relies on that
    /// finite bound; downstream consumers expect the resulting arithmetic
    /// unchanged.
    pub fn bin_upper(&self, bin: usize) -> f64 {
        self.bin_lower(bin + 1)
    }

    /// Finite upper bound of the classification range.
    pub fn upper(&self) -> f64 {
        self.bin_upper(self.number_of_bins_in_record() - 1)
    }

    /// Counts-weighted average of bin midpoints, in km/h.
    ///
    /// Returns `None` when `counts` holds no observations. Counts beyond the
    /// declared bin range are ignored.
    pub fn mean_speed(&self, counts: &[u32]) -> Option<f64> {
        let bins = self.number_of_bins_in_record();
        let mut total = 0u64;
        let mut weighted = 0.0;
        for (bin, &count) in counts.iter().take(bins).enumerate() {
            let midpoint = (self.bin_lower(bin) + self.bin_upper(bin)) / 2.0;
            weighted += midpoint * count as f64;
            total += count as u64;
        }
        if total == 0 {
            return None;
        }
        Some(weighted / total as f64)
    }

    /// Stop recording this dimension by zeroing the bin layout.
    pub fn clear(&mut self) {
        self.first_bin_width = 0.0;
        self.other_bin_width = 0.0;
        self.maximum_bin = 0;
    }
}

impl BinSet for SpeedClassification {
    fn maximum_bin(&self) -> usize {
        self.maximum_bin as usize
    }

    fn is_recording(&self) -> bool {
        self.maximum_bin > 0
    }
}
