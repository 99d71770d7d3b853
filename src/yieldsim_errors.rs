use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum YieldSimError {
    #[error("Invalid survey parameter: {0}")]
    InvalidSurveyParameter(String),

    #[error("Invalid occurrence calibration: {0}")]
    InvalidCalibration(String),

    #[error("Invalid noise model: {0}")]
    InvalidNoiseModel(String),

    #[error("Error during the nom parsing: {0}")]
    NomParsingError(String),

    #[error("Occurrence table `{0}` has no selectable bins (all weights are zero)")]
    EmptyOccurrenceTable(String),

    #[error("Occurrence table is malformed: {0}")]
    MalformedOccurrenceTable(String),

    #[error("Coverage matrix was given {values} values for {stars} stars x {epochs} epochs")]
    CoverageShapeMismatch {
        values: usize,
        stars: usize,
        epochs: usize,
    },

    #[error("Coverage matrix has {rows} rows for a catalog of {stars} stars")]
    CoverageRowMismatch { rows: usize, stars: usize },

    #[error("Coverage matrix has {cols} epochs but the survey is configured for {expected}")]
    CoverageEpochMismatch { cols: usize, expected: usize },

    #[error("Star {star_id} has non-physical parameters: {reason}")]
    NonPhysicalStar { star_id: u64, reason: String },

    #[error("Eccentricity distribution construction failed: {0:?}")]
    EccentricityDistributionError(rand_distr::BetaError),

    #[error("Planet count distribution construction failed: {0:?}")]
    PlanetCountDistributionError(rand_distr::PoissonError),
}

impl From<rand_distr::BetaError> for YieldSimError {
    fn from(err: rand_distr::BetaError) -> Self {
        YieldSimError::EccentricityDistributionError(err)
    }
}

impl From<rand_distr::PoissonError> for YieldSimError {
    fn from(err: rand_distr::PoissonError) -> Self {
        YieldSimError::PlanetCountDistributionError(err)
    }
}
