//! Adaptive quantization: equal-population bins derived from the image's own
//! value distribution.

use crate::BitDepth;

/// A per-channel table mapping bin index to representative output value.
///
/// Built once per channel per quantization pass from every sample in the
/// image, then reused for each pixel's lookup. Construction partitions the
/// *sorted* samples into `2^bits` rank-contiguous groups of equal size, with
/// the last group absorbing any remainder, and takes the truncating integer
/// mean of each group as its representative.
///
/// For identity depths (8 bits) no table exists and channel values pass
/// through unchanged; [`BinTable::compute`] signals this by returning `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinTable {
    /// The representative value for each bin, indexed by bin index.
    reps: Vec<u8>,
}

impl BinTable {
    /// Builds the bin table for one channel from all of its samples.
    ///
    /// Returns `None` when `depth` is the identity, and also when there are
    /// fewer samples than bins (the partition would leave bins empty), in
    /// which case the channel passes through unquantized.
    #[must_use]
    pub fn compute(mut samples: Vec<u8>, depth: BitDepth) -> Option<Self> {
        if depth.is_identity() {
            return None;
        }

        let levels = usize::from(depth.levels());
        let n = samples.len();
        if n < levels {
            return None;
        }

        samples.sort_unstable();
        let bin_size = n / levels;

        let reps = (0..levels)
            .map(|i| {
                let start = i * bin_size;
                // the last bin runs to the end of the samples and may be
                // larger than the rest
                let end = if i == levels - 1 { n } else { (i + 1) * bin_size };
                let sum: u64 = samples[start..end].iter().map(|&v| u64::from(v)).sum();

                #[allow(clippy::cast_possible_truncation)]
                {
                    (sum / (end - start) as u64) as u8
                }
            })
            .collect();

        Some(Self { reps })
    }

    /// Returns the number of bins, `2^bits`.
    #[must_use]
    pub fn levels(&self) -> usize {
        self.reps.len()
    }

    /// Looks up the representative for a channel value.
    ///
    /// The bin index is `value * levels / 256`, i.e. the lookup slices the
    /// value range uniformly even though the bins were populated by rank.
    /// When the sample distribution is skewed, a value can therefore land in
    /// a bin whose population does not contain it. This mismatch is kept
    /// intentionally; see the crate's DESIGN notes.
    #[must_use]
    pub fn apply(&self, value: u8) -> u8 {
        self.reps[value as usize * self.levels() / 256]
    }
}
