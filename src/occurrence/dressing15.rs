use super::{BinSampler, RateBin};
use crate::yieldsim_errors::YieldSimError;

/// Period bin edges in days. The last row extends the published table from
/// 200 to 365 days reusing the 110-200 day rates.
const PERIOD_EDGES: [f64; 12] = [
    0.5, 0.91, 1.66, 3.02, 5.49, 10.0, 18.2, 33.1, 60.3, 110.0, 200.0, 365.0,
];

/// Radius bin edges in Earth radii, half-radius steps from 0.5 to 4.
const RADIUS_EDGES: [f64; 8] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];

/// Ticket counts per (period row, radius column), from the M-dwarf occurrence
/// rates of Dressing & Charbonneau (2015). Cells the measurement leaves empty
/// carry zero tickets and are never drawn.
const TICKETS: [[u32; 7]; 11] = [
    [400, 460, 61, 2, 0, 0, 0],
    [1500, 1400, 270, 9, 4, 6, 8],
    [4400, 3500, 1200, 420, 230, 170, 180],
    [5500, 5700, 2500, 1800, 960, 420, 180],
    [10000, 10000, 6700, 6400, 2700, 1100, 360],
    [12000, 13000, 13000, 9300, 3800, 1400, 510],
    [11000, 16000, 14000, 10000, 4600, 810, 320],
    [6400, 6400, 12000, 12000, 5800, 1600, 210],
    [10000, 10000, 8300, 9600, 4200, 1700, 420],
    [19000, 19000, 10000, 4500, 1100, 160, 80],
    [19000, 19000, 10000, 4500, 1100, 160, 80],
];

fn bins() -> Vec<RateBin> {
    let mut bins = Vec::with_capacity(TICKETS.len() * 7);
    for (row, tickets) in TICKETS.iter().enumerate() {
        for (col, &weight) in tickets.iter().enumerate() {
            bins.push(RateBin {
                radius_lo: RADIUS_EDGES[col],
                radius_hi: RADIUS_EDGES[col + 1],
                period_lo: PERIOD_EDGES[row],
                period_hi: PERIOD_EDGES[row + 1],
                weight,
                radius_tail: None,
            });
        }
    }
    bins
}

/// M-dwarf occurrence sampler, Dressing & Charbonneau (2015).
pub(super) fn sampler() -> Result<BinSampler, YieldSimError> {
    BinSampler::from_bins("dressing15", bins())
}
