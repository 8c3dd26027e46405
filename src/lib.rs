//! Simulated annealing for combinatorial ordering and selection problems.
//!
//! Finds a low-cost ordering of the rows of a point dataset (travelling
//! salesman style sequencing) or a low-cost `k`-row subset of it. The
//! search loop is generic over two policies:
//!
//! - **Cooling**: a pure function from step to temperature. Seven built-in
//!   schedules are provided by [`sa::CoolingSchedule`].
//! - **Fitness**: a pure function from an arrangement to a score, lower is
//!   better. [`sa::LinearEuclidean`] and [`sa::CircularEuclidean`] measure
//!   open and closed path length.
//!
//! All randomness flows through an injectable [`rand::Rng`], so runs are
//! reproducible from a seed.
//!
//! Progress is reported through [`tracing`]; install a subscriber in the
//! application to see it.

pub mod error;
pub mod sa;

pub use error::{AnnealError, ErrorKind, Result};
