pub mod catalog;
pub mod constants;
pub mod coverage;
pub mod detection;
pub mod noise;
pub mod occurrence;
pub mod population;
pub mod simulation;
pub mod transit;
pub mod yieldsim_errors;
