//! Contains the sweep driver: distortion reporting over every way of
//! splitting a bit budget across the three channels.

use crate::{mse, quantize, BitAllocation, ColorSpace, PixelBuffer, QuantizeMethod};
use ordered_float::OrderedFloat;
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// One result row of a sweep: the allocation that was evaluated and the
/// distortion it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRow {
    /// The total bit budget the sweep was run with.
    pub budget: u8,
    /// The color space the pipeline ran in.
    pub colorspace: ColorSpace,
    /// The binning strategy the pipeline ran with.
    pub method: QuantizeMethod,
    /// The per-channel depths of this cell.
    pub bits: BitAllocation,
    /// The mean squared error against the source image.
    pub mse: f64,
}

/// Enumerates every valid split of `budget` bits across three channels.
///
/// `q1` ascends in the outer position and `q2` in the inner; `q3` is derived
/// as `budget - q1 - q2` and combinations where it falls outside `[1, 8]`
/// are skipped. Budgets outside `[3, 24]` therefore produce no allocations.
#[must_use]
pub fn valid_allocations(budget: u8) -> Vec<BitAllocation> {
    let mut allocations = Vec::new();
    for q1 in 1..=8 {
        for q2 in 1..=8 {
            let q3 = i32::from(budget) - q1 - q2;
            if (1..=8).contains(&q3) {
                allocations.push(BitAllocation::from_clamped(q1, q2, q3));
            }
        }
    }
    allocations
}

/// Evaluates one sweep cell.
fn run_cell(
    image: &PixelBuffer,
    colorspace: ColorSpace,
    method: QuantizeMethod,
    budget: u8,
    bits: BitAllocation,
) -> SweepRow {
    let quantized = quantize(image, colorspace, method, bits);
    SweepRow {
        budget,
        colorspace,
        method,
        bits,
        mse: mse(image, &quantized),
    }
}

/// Runs the pipeline and evaluator over every valid allocation of `budget`
/// bits, returning one row per cell in enumeration order.
///
/// # Examples
/// ```
/// # use bitquant::{sweep, ColorSpace, PixelBuffer, QuantizeMethod};
/// # use palette::Srgb;
/// # fn main() -> Result<(), bitquant::DimensionMismatch> {
/// let image = PixelBuffer::new(2, 1, vec![Srgb::new(9, 80, 222), Srgb::new(41, 0, 160)])?;
/// let rows = sweep(&image, ColorSpace::Rgb, QuantizeMethod::Uniform, 6);
/// assert!(rows.iter().all(|row| row.bits.total() == 6));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn sweep(
    image: &PixelBuffer,
    colorspace: ColorSpace,
    method: QuantizeMethod,
    budget: u8,
) -> Vec<SweepRow> {
    valid_allocations(budget)
        .into_iter()
        .map(|bits| run_cell(image, colorspace, method, budget, bits))
        .collect()
}

/// Parallel version of [`sweep`].
///
/// Each sweep cell is independent, so the cells fan out across the rayon
/// thread pool; the returned rows are in the same deterministic order as the
/// single-threaded version.
#[cfg(feature = "threads")]
#[must_use]
pub fn sweep_par(
    image: &PixelBuffer,
    colorspace: ColorSpace,
    method: QuantizeMethod,
    budget: u8,
) -> Vec<SweepRow> {
    valid_allocations(budget)
        .into_par_iter()
        .map(|bits| run_cell(image, colorspace, method, budget, bits))
        .collect()
}

/// Returns the row with the lowest distortion, or `None` for an empty report.
///
/// Ties resolve to the earliest row in enumeration order.
#[must_use]
pub fn best_row(rows: &[SweepRow]) -> Option<&SweepRow> {
    rows.iter().min_by_key(|row| OrderedFloat(row.mse))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn allocation_count_matches_valid_pairs() {
        for budget in 0..=30u8 {
            let expected = (1..=8i32)
                .flat_map(|q1| (1..=8i32).map(move |q2| i32::from(budget) - q1 - q2))
                .filter(|q3| (1..=8).contains(q3))
                .count();
            assert_eq!(valid_allocations(budget).len(), expected);
        }
    }

    #[test]
    fn allocations_preserve_budget_and_order() {
        let allocations = valid_allocations(12);
        for bits in &allocations {
            assert_eq!(bits.total(), 12);
        }

        let pairs: Vec<[u8; 2]> = allocations
            .iter()
            .map(|bits| {
                let [q1, q2, _] = bits.channels();
                [q1.into_inner(), q2.into_inner()]
            })
            .collect();
        let mut sorted = pairs.clone();
        sorted.sort_unstable();
        assert_eq!(pairs, sorted);
    }

    #[test]
    fn no_allocations_outside_feasible_budgets() {
        assert!(valid_allocations(2).is_empty());
        assert!(valid_allocations(25).is_empty());
    }

    #[test]
    fn rows_mirror_allocations() {
        let image = test_image(8, 8);
        let rows = sweep(&image, ColorSpace::Rgb, QuantizeMethod::Uniform, 9);

        assert_eq!(
            rows.iter().map(|row| row.bits).collect::<Vec<_>>(),
            valid_allocations(9)
        );
        for row in &rows {
            assert_eq!(row.budget, 9);
            assert_eq!(row.colorspace, ColorSpace::Rgb);
            assert_eq!(row.method, QuantizeMethod::Uniform);
            assert!(row.mse >= 0.0);
        }
    }

    #[test]
    fn full_budget_rows_have_zero_error() {
        let image = test_image(8, 8);
        let rows = sweep(&image, ColorSpace::Rgb, QuantizeMethod::Uniform, 24);

        // the only valid split of 24 bits is (8,8,8), which is an identity
        assert_eq!(rows.len(), 1);
        assert!(rows[0].mse.abs() < f64::EPSILON);
    }

    #[test]
    fn best_row_is_minimum() {
        let image = test_image(8, 8);
        let rows = sweep(&image, ColorSpace::Yuv, QuantizeMethod::Adaptive, 10);

        let best = best_row(&rows).unwrap();
        for row in &rows {
            assert!(best.mse <= row.mse);
        }

        assert_eq!(best_row(&[]), None);
    }

    #[test]
    #[cfg(feature = "threads")]
    fn single_and_multi_threaded_match() {
        let image = test_image(16, 16);

        for (colorspace, method) in [
            (ColorSpace::Rgb, QuantizeMethod::Uniform),
            (ColorSpace::Yuv, QuantizeMethod::Adaptive),
        ] {
            let single = sweep(&image, colorspace, method, 12);
            let par = sweep_par(&image, colorspace, method, 12);
            assert_eq!(single, par);
        }
    }
}
