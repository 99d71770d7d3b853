//! # Gridded occurrence tables
//!
//! This module reads **occurrence-mass grids**: rectangular tables over
//! logarithmic radius and period bins where each cell holds the expected
//! number of planets per star. The three built-in grids share the SAG13
//! power-law shape and differ only in normalization; external grids can be
//! loaded from the same text format with [`OccurrenceGrid::parse`] or built
//! in memory with [`OccurrenceGrid::from_arrays`].
//!
//! ## File format
//!
//! ```text
//! ! comment lines start with an exclamation mark
//! radius 0.5000 0.7071 1.0000 ...
//! period 0.5000 0.8891 1.5811 ...
//! 7.539586e-02 8.756841e-02 ...
//! 7.059105e-02 8.198787e-02 ...
//! ```
//!
//! One mass row per radius bin, one column per period bin. Cell masses are
//! turned into integer ticket counts by [`OccurrenceGrid::ticket_bins`];
//! cells whose mass rounds to zero tickets can never produce a planet.
use nom::{
    bytes::complete::tag,
    character::complete::space1,
    multi::separated_list1,
    number::complete::double,
    sequence::preceded,
    IResult, Parser,
};

use super::{BinSampler, RateBin};
use crate::yieldsim_errors::YieldSimError;

/// Tickets handed out per unit of cell mass when a grid is converted into a
/// weighted sampler. One ticket therefore stands for 1e-4 planets per star.
pub const TICKETS_PER_UNIT_MASS: f64 = 1e4;

static BURKE15_GRID: &str = include_str!("data_grids/burke15.grid");
static BRYSON20_GRID: &str = include_str!("data_grids/bryson20.grid");
static LUVOIR_GRID: &str = include_str!("data_grids/luvoir.grid");

fn parse_numbers(input: &str) -> IResult<&str, Vec<f64>> {
    separated_list1(space1, double).parse(input)
}

fn parse_radius_line(input: &str) -> IResult<&str, Vec<f64>> {
    preceded((tag("radius"), space1), parse_numbers).parse(input)
}

fn parse_period_line(input: &str) -> IResult<&str, Vec<f64>> {
    preceded((tag("period"), space1), parse_numbers).parse(input)
}

fn ascending_and_finite(edges: &[f64]) -> bool {
    edges.len() >= 2
        && edges.iter().all(|edge| edge.is_finite())
        && edges.windows(2).all(|pair| pair[0] < pair[1])
}

/// A parsed occurrence-mass grid.
///
/// Rows follow the radius bins, columns the period bins, matching the file
/// layout.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceGrid {
    radius_edges: Vec<f64>,
    period_edges: Vec<f64>,
    mass: Vec<Vec<f64>>,
}

impl OccurrenceGrid {
    /// Build a grid from edge arrays and a row-major mass table.
    ///
    /// Arguments
    /// -----------------
    /// * `radius_edges`: ascending radius bin edges in Earth radii.
    /// * `period_edges`: ascending period bin edges in days.
    /// * `mass`: one row per radius bin, one column per period bin, expected
    ///   planets per star in each cell.
    ///
    /// Return
    /// ----------
    /// * The validated grid, or a [`YieldSimError::MalformedOccurrenceTable`]
    ///   naming the first violated constraint.
    pub fn from_arrays(
        radius_edges: Vec<f64>,
        period_edges: Vec<f64>,
        mass: Vec<Vec<f64>>,
    ) -> Result<Self, YieldSimError> {
        if !ascending_and_finite(&radius_edges) {
            return Err(YieldSimError::MalformedOccurrenceTable(
                "radius edges must be at least two finite ascending values".to_string(),
            ));
        }
        if !ascending_and_finite(&period_edges) {
            return Err(YieldSimError::MalformedOccurrenceTable(
                "period edges must be at least two finite ascending values".to_string(),
            ));
        }
        let n_radius = radius_edges.len() - 1;
        let n_period = period_edges.len() - 1;
        if mass.len() != n_radius {
            return Err(YieldSimError::MalformedOccurrenceTable(format!(
                "expected {n_radius} mass rows, found {}",
                mass.len()
            )));
        }
        for (row, values) in mass.iter().enumerate() {
            if values.len() != n_period {
                return Err(YieldSimError::MalformedOccurrenceTable(format!(
                    "mass row {row} has {} columns, expected {n_period}",
                    values.len()
                )));
            }
            if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
                return Err(YieldSimError::MalformedOccurrenceTable(format!(
                    "mass row {row} contains a non-finite or negative cell ({bad})"
                )));
            }
        }
        Ok(Self {
            radius_edges,
            period_edges,
            mass,
        })
    }

    /// Parse a grid from its text representation.
    ///
    /// Comment lines start with `!`. The `radius` and `period` edge lines may
    /// appear in either order but must both precede nothing in particular;
    /// every remaining non-empty line is one mass row.
    pub fn parse(content: &str) -> Result<Self, YieldSimError> {
        let mut radius_edges: Option<Vec<f64>> = None;
        let mut period_edges: Option<Vec<f64>> = None;
        let mut mass = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }
            if line.starts_with("radius") {
                let (_, edges) = parse_radius_line(line)
                    .map_err(|_e| YieldSimError::NomParsingError(line.to_string()))?;
                radius_edges = Some(edges);
            } else if line.starts_with("period") {
                let (_, edges) = parse_period_line(line)
                    .map_err(|_e| YieldSimError::NomParsingError(line.to_string()))?;
                period_edges = Some(edges);
            } else {
                let (_, row) = parse_numbers(line)
                    .map_err(|_e| YieldSimError::NomParsingError(line.to_string()))?;
                mass.push(row);
            }
        }

        let radius_edges = radius_edges.ok_or_else(|| {
            YieldSimError::MalformedOccurrenceTable("missing `radius` edge line".to_string())
        })?;
        let period_edges = period_edges.ok_or_else(|| {
            YieldSimError::MalformedOccurrenceTable("missing `period` edge line".to_string())
        })?;
        Self::from_arrays(radius_edges, period_edges, mass)
    }

    pub fn n_radius_bins(&self) -> usize {
        self.radius_edges.len() - 1
    }

    pub fn n_period_bins(&self) -> usize {
        self.period_edges.len() - 1
    }

    pub fn radius_edges(&self) -> &[f64] {
        &self.radius_edges
    }

    pub fn period_edges(&self) -> &[f64] {
        &self.period_edges
    }

    /// Mass of the cell at radius row `i` and period column `j`.
    pub fn cell(&self, i: usize, j: usize) -> f64 {
        self.mass[i][j]
    }

    /// Convert the grid into rate bins, rounding each cell mass to an integer
    /// ticket count at [`TICKETS_PER_UNIT_MASS`] tickets per planet per star.
    pub fn ticket_bins(&self) -> Vec<RateBin> {
        let mut bins = Vec::with_capacity(self.n_radius_bins() * self.n_period_bins());
        for (i, row) in self.mass.iter().enumerate() {
            for (j, &mass) in row.iter().enumerate() {
                bins.push(RateBin {
                    radius_lo: self.radius_edges[i],
                    radius_hi: self.radius_edges[i + 1],
                    period_lo: self.period_edges[j],
                    period_hi: self.period_edges[j + 1],
                    weight: (mass * TICKETS_PER_UNIT_MASS).round() as u32,
                    radius_tail: None,
                });
            }
        }
        bins
    }

    /// Build the weighted sampler for this grid.
    pub fn sampler(&self, name: &str) -> Result<BinSampler, YieldSimError> {
        BinSampler::from_bins(name, self.ticket_bins())
    }
}

/// The grids shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GridPreset {
    Burke15,
    Bryson20,
    Luvoir,
}

impl GridPreset {
    fn source(self) -> (&'static str, &'static str) {
        match self {
            GridPreset::Burke15 => ("burke15", BURKE15_GRID),
            GridPreset::Bryson20 => ("bryson20", BRYSON20_GRID),
            GridPreset::Luvoir => ("luvoir", LUVOIR_GRID),
        }
    }
}

pub(super) fn preset_sampler(preset: GridPreset) -> Result<BinSampler, YieldSimError> {
    let (name, content) = preset.source();
    OccurrenceGrid::parse(content)?.sampler(name)
}
