use super::{BinSampler, PowerLawTail, RateBin, GIANT_TAIL_EXPONENT};
use crate::yieldsim_errors::YieldSimError;

/// Measured cells of the Petigura et al. (2018) CKS occurrence grid as
/// `(radius_lo, radius_hi, period_lo, period_hi, tickets)`, radius in Earth
/// radii and period in days. Cells without a published measurement are simply
/// absent. The first [`GIANT_CELLS`] rows are the giant-planet cells.
const CELLS: [(f64, f64, f64, f64, u32); 70] = [
    (11.31, 16.00, 1.00, 1.78, 2),
    (11.31, 16.00, 1.78, 3.16, 8),
    (11.31, 16.00, 3.16, 5.62, 21),
    (11.31, 16.00, 5.62, 10.00, 8),
    (11.31, 16.00, 31.62, 56.23, 24),
    (11.31, 16.00, 100.00, 177.83, 52),
    (11.31, 16.00, 177.83, 316.23, 77),
    (8.00, 11.31, 3.16, 5.62, 5),
    (8.00, 11.31, 17.78, 31.62, 26),
    (8.00, 11.31, 31.62, 56.23, 24),
    (8.00, 11.31, 100.00, 177.83, 145),
    (8.00, 11.31, 177.83, 316.23, 259),
    (5.66, 8.00, 3.16, 5.62, 5),
    (5.66, 8.00, 5.62, 10.00, 12),
    (5.66, 8.00, 10.00, 17.78, 18),
    (5.66, 8.00, 17.78, 31.62, 17),
    (5.66, 8.00, 31.62, 56.23, 38),
    (5.66, 8.00, 177.83, 316.23, 168),
    (4.00, 5.66, 3.16, 5.62, 12),
    (4.00, 5.66, 5.62, 10.00, 8),
    (4.00, 5.66, 10.00, 17.78, 25),
    (4.00, 5.66, 17.78, 31.62, 56),
    (4.00, 5.66, 31.62, 56.23, 53),
    (4.00, 5.66, 56.23, 100.00, 78),
    (4.00, 5.66, 100.00, 177.83, 84),
    (4.00, 5.66, 177.83, 316.23, 78),
    (2.83, 4.00, 1.78, 3.16, 6),
    (2.83, 4.00, 3.16, 5.62, 8),
    (2.83, 4.00, 5.62, 10.00, 94),
    (2.83, 4.00, 10.00, 17.78, 180),
    (2.83, 4.00, 17.78, 31.62, 185),
    (2.83, 4.00, 31.62, 56.23, 258),
    (2.83, 4.00, 56.23, 100.00, 275),
    (2.83, 4.00, 100.00, 177.83, 312),
    (2.83, 4.00, 177.83, 316.23, 225),
    (2.00, 2.83, 1.78, 3.16, 8),
    (2.00, 2.83, 3.16, 5.62, 77),
    (2.00, 2.83, 5.62, 10.00, 138),
    (2.00, 2.83, 10.00, 17.78, 423),
    (2.00, 2.83, 17.78, 31.62, 497),
    (2.00, 2.83, 31.62, 56.23, 667),
    (2.00, 2.83, 56.23, 100.00, 475),
    (2.00, 2.83, 100.00, 177.83, 270),
    (2.00, 2.83, 177.83, 316.23, 147),
    (1.41, 2.00, 1.00, 1.78, 8),
    (1.41, 2.00, 1.78, 3.16, 34),
    (1.41, 2.00, 3.16, 5.62, 125),
    (1.41, 2.00, 5.62, 10.00, 202),
    (1.41, 2.00, 10.00, 17.78, 279),
    (1.41, 2.00, 17.78, 31.62, 261),
    (1.41, 2.00, 31.62, 56.23, 251),
    (1.41, 2.00, 56.23, 100.00, 186),
    (1.41, 2.00, 100.00, 177.83, 360),
    (1.41, 2.00, 177.83, 316.23, 393),
    (1.00, 1.41, 1.00, 1.78, 12),
    (1.00, 1.41, 1.78, 3.16, 36),
    (1.00, 1.41, 3.16, 5.62, 141),
    (1.00, 1.41, 5.62, 10.00, 263),
    (1.00, 1.41, 10.00, 17.78, 450),
    (1.00, 1.41, 17.78, 31.62, 350),
    (1.00, 1.41, 31.62, 56.23, 287),
    (1.00, 1.41, 56.23, 100.00, 249),
    (0.71, 1.00, 1.00, 1.78, 12),
    (0.71, 1.00, 1.78, 3.16, 52),
    (0.71, 1.00, 3.16, 5.62, 128),
    (0.71, 1.00, 5.62, 10.00, 315),
    (0.71, 1.00, 10.00, 17.78, 205),
    (0.71, 1.00, 17.78, 31.62, 447),
    (0.50, 0.71, 1.00, 1.78, 8),
    (0.50, 0.71, 1.78, 3.16, 50),
];

/// Number of leading cells whose radius draw follows the giant tail.
const GIANT_CELLS: usize = 12;

const GIANT_TAIL: PowerLawTail = PowerLawTail {
    lower: 8.0,
    upper: 16.0,
    exponent: GIANT_TAIL_EXPONENT,
};

fn bins() -> Vec<RateBin> {
    CELLS
        .iter()
        .enumerate()
        .map(
            |(idx, &(radius_lo, radius_hi, period_lo, period_hi, weight))| RateBin {
                radius_lo,
                radius_hi,
                period_lo,
                period_hi,
                weight,
                radius_tail: (idx < GIANT_CELLS).then_some(GIANT_TAIL),
            },
        )
        .collect()
}

/// FGK occurrence sampler, Petigura et al. (2018).
pub(super) fn sampler() -> Result<BinSampler, YieldSimError> {
    BinSampler::from_bins("petigura18", bins())
}
