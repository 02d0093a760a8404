use std::ops::Index;

use super::IntensityPlane;

/// Number of distinct 8-bit intensity levels.
pub const LEVELS: usize = 256;

/// Pixel counts per intensity level.
///
/// The counts always sum to the pixel count of the plane they were taken
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Histogram {
    /// Count every pixel of `plane` into its intensity bucket.
    pub fn from_plane(plane: &IntensityPlane) -> Self {
        let mut counts = [0u64; LEVELS];
        for row in plane.rows() {
            for &value in row {
                counts[value as usize] += 1;
            }
        }
        Self { counts }
    }

    pub fn from_counts(counts: [u64; LEVELS]) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    /// Sum of all buckets.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest single bucket, used to scale plots.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Running sum from the darkest level up; `cdf[0] == counts[0]`.
    pub fn cumulative(&self) -> [u64; LEVELS] {
        let mut cdf = [0u64; LEVELS];
        let mut running = 0u64;
        for (slot, &count) in cdf.iter_mut().zip(self.counts.iter()) {
            running += count;
            *slot = running;
        }
        cdf
    }

    /// Number of buckets with at least one pixel.
    pub fn occupied_levels(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            counts: [0; LEVELS],
        }
    }
}

impl Index<u8> for Histogram {
    type Output = u64;

    fn index(&self, level: u8) -> &u64 {
        &self.counts[level as usize]
    }
}
