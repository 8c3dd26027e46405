//! Simulated Annealing over row orderings and row subsets.
//!
//! The engine repeatedly perturbs an index permutation of a [`Dataset`],
//! scores the resulting arrangement with a [`Fitness`] and accepts or
//! rejects it using the temperature given by a [`Cooling`] schedule.
//!
//! # Core Traits
//!
//! - [`Cooling`]: step to temperature
//! - [`Fitness`]: arrangement to score (lower is better)
//! - [`Mixing`]: in-place index perturbation
//!
//! # Key Types
//!
//! - [`CoolingSchedule`]: the built-in [`Schedule`] formulas over a [`CoolingConfig`]
//! - [`AnnealingEngine`]: runs the search and keeps the [`RunHistory`]
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod fitness;
mod history;
pub mod mixing;
mod runner;
mod types;

pub use config::{
    exponential_cooling, inverse_cooling, linear_cooling, quadratic_cooling, CoolingConfig,
    CoolingSchedule, Schedule,
};
pub use fitness::{CircularEuclidean, LinearEuclidean};
pub use history::{RunHistory, RunStats, Sample};
pub use mixing::{Mixing, NOpt, Swap};
pub use runner::{AnnealingEngine, DEFAULT_NSHUFFLE};
pub use types::{Cooling, Dataset, Fitness};
