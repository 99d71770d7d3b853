use super::{BinSampler, PowerLawTail, RateBin, GIANT_TAIL_EXPONENT};
use crate::yieldsim_errors::YieldSimError;

/// Period coverage of each row in days. The published table stops at 85 days;
/// the last four rows extrapolate it outward reusing the 50-85 day rates, the
/// first of them widening to 50-150 days.
const PERIOD_ROWS: [(f64, f64); 11] = [
    (0.8, 2.0),
    (2.0, 3.4),
    (3.4, 5.9),
    (5.9, 10.0),
    (10.0, 17.0),
    (17.0, 29.0),
    (29.0, 50.0),
    (50.0, 85.0),
    (50.0, 150.0),
    (150.0, 270.0),
    (270.0, 480.0),
];

/// Radius classes in Earth radii: Earths, super-Earths, small Neptunes,
/// large Neptunes, giants.
const RADIUS_COLS: [(f64, f64); 5] = [(0.8, 1.25), (1.25, 2.0), (2.0, 4.0), (4.0, 6.0), (6.0, 22.0)];

/// Ticket counts per (period row, radius class), Fressin et al. (2013).
const TICKETS: [[u32; 5]; 11] = [
    [180, 170, 35, 4, 15],
    [610, 740, 180, 6, 67],
    [1720, 1490, 730, 110, 170],
    [2700, 2900, 1930, 91, 180],
    [2700, 4300, 3670, 290, 270],
    [2930, 4490, 5290, 320, 230],
    [4080, 5290, 6450, 490, 350],
    [3460, 3660, 5250, 660, 710],
    [3460, 3660, 5250, 660, 710],
    [3460, 3660, 5250, 660, 710],
    [3460, 3660, 5250, 660, 710],
];

const GIANT_TAIL: PowerLawTail = PowerLawTail {
    lower: 6.0,
    upper: 22.0,
    exponent: GIANT_TAIL_EXPONENT,
};

fn bins() -> Vec<RateBin> {
    let mut bins = Vec::with_capacity(TICKETS.len() * 5);
    for (row, tickets) in TICKETS.iter().enumerate() {
        let (period_lo, period_hi) = PERIOD_ROWS[row];
        for (col, &weight) in tickets.iter().enumerate() {
            let (radius_lo, radius_hi) = RADIUS_COLS[col];
            bins.push(RateBin {
                radius_lo,
                radius_hi,
                period_lo,
                period_hi,
                weight,
                radius_tail: (col == 4).then_some(GIANT_TAIL),
            });
        }
    }
    bins
}

/// FGK occurrence sampler, Fressin et al. (2013) with long-period
/// extrapolation.
pub(super) fn sampler() -> Result<BinSampler, YieldSimError> {
    BinSampler::from_bins("fressin13", bins())
}

#[cfg(test)]
mod test_fressin13 {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_table_shape() {
        let sampler = sampler().unwrap();
        assert_eq!(sampler.bins().len(), 55);
        assert_eq!(sampler.total_weight(), 110_138);
        let giants = sampler
            .bins()
            .iter()
            .filter(|bin| bin.radius_tail.is_some())
            .count();
        assert_eq!(giants, 11);
    }

    #[test]
    fn test_giant_draws_follow_the_tail() {
        let sampler = sampler().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut saw_giant = false;
        for (radius, period) in sampler.sample_many(20_000, &mut rng) {
            assert!((0.8..=22.0).contains(&radius));
            assert!((0.8..480.0).contains(&period));
            if radius > 6.0 {
                saw_giant = true;
            }
        }
        assert!(saw_giant);
    }
}
