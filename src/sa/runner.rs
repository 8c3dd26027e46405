//! Annealing execution loop.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::{debug, debug_span, info};

use super::history::{RunHistory, RunStats, Sample};
use super::mixing::{Mixing, NOpt};
use super::types::{Cooling, Dataset, Fitness};
use crate::error::{AnnealError, Result};

/// Default upper bound on the number of positions perturbed per step.
pub const DEFAULT_NSHUFFLE: usize = 3;

/// Anneals the row order (or a row subset) of a dataset.
///
/// The engine owns the dataset and may run many times; each call to
/// [`simulate`](Self::simulate) resets the temperature, the history and
/// the run statistics.
///
/// # Acceptance
///
/// A candidate replaces the current state when its score is not worse,
/// or when `u * tm_max < T(step)` for a uniform draw `u` in `[0, 1)`.
/// The escape probability is therefore `T(step) / tm_max`, independent of
/// how much worse the candidate is.
///
/// # Examples
///
/// ```
/// use u_anneal::sa::{
///     AnnealingEngine, CircularEuclidean, CoolingConfig, CoolingSchedule, Dataset, Schedule,
/// };
///
/// let data = Dataset::from_rows([[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
/// let cooling = CoolingSchedule::new(
///     Schedule::Exponential,
///     CoolingConfig::default().with_steps(2_000).with_alpha(0.99),
/// )
/// .unwrap();
///
/// let mut engine = AnnealingEngine::new(data, cooling, CircularEuclidean).with_seed(42);
/// let tour = engine.simulate(None, 3).unwrap();
/// assert_eq!(tour.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct AnnealingEngine<C, F, M = NOpt> {
    data: Dataset,
    cooling: C,
    fitness: F,
    mixing: M,
    seed: Option<u64>,
    temperature: f64,
    history: RunHistory,
    stats: RunStats,
}

impl<C: Cooling, F: Fitness> AnnealingEngine<C, F, NOpt> {
    /// Creates an idle engine using [`NOpt`] perturbation.
    pub fn new(data: Dataset, cooling: C, fitness: F) -> Self {
        let temperature = cooling.tm_max();
        Self {
            data,
            cooling,
            fitness,
            mixing: NOpt,
            seed: None,
            temperature,
            history: RunHistory::new(),
            stats: RunStats::default(),
        }
    }
}

impl<C: Cooling, F: Fitness, M: Mixing> AnnealingEngine<C, F, M> {
    /// Replaces the perturbation strategy.
    ///
    /// Runs with steps need at least [`Mixing::min_len`] rows in the working
    /// arrangement.
    pub fn with_mixing<N: Mixing>(self, mixing: N) -> AnnealingEngine<C, F, N> {
        AnnealingEngine {
            data: self.data,
            cooling: self.cooling,
            fitness: self.fitness,
            mixing,
            seed: self.seed,
            temperature: self.temperature,
            history: self.history,
            stats: self.stats,
        }
    }

    /// Seeds the generator used by [`simulate`](Self::simulate).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total step count of the cooling schedule.
    pub fn steps(&self) -> usize {
        self.cooling.steps()
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn cooling(&self) -> &C {
        &self.cooling
    }

    pub fn fitness(&self) -> &F {
        &self.fitness
    }

    /// Temperature at the last executed step, or `tm_max` before any step.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Samples accepted during the last run.
    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    /// Statistics of the last run.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Draws `k` distinct rows uniformly at random, in random order.
    ///
    /// `None` draws every row, producing a random shuffle of the dataset.
    pub fn nucleate<R: Rng + ?Sized>(&self, k: Option<usize>, rng: &mut R) -> Result<Dataset> {
        let total = self.data.len();
        let k = k.unwrap_or(total);
        if k > total {
            return Err(AnnealError::SubsampleTooLarge {
                requested: k,
                available: total,
            });
        }
        let picked = index::sample(rng, total, k).into_vec();
        self.data.select(&picked)
    }

    /// Runs one annealing pass with the engine's seed, or a random one.
    ///
    /// See [`simulate_with_rng`](Self::simulate_with_rng).
    pub fn simulate(&mut self, k: Option<usize>, nshuffle: usize) -> Result<Dataset> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        self.simulate_with_rng(k, nshuffle, &mut rng)
    }

    /// Runs one annealing pass and returns the final accepted arrangement.
    ///
    /// With `k`, the search starts from a random `k`-row subsample; without
    /// it, from the full dataset in its given order. Each step perturbs up to
    /// `nshuffle` positions.
    ///
    /// # Errors
    ///
    /// Fails before touching any state if `nshuffle < 2`, if `k` exceeds the
    /// dataset, or if steps are scheduled but the working arrangement is
    /// shorter than the mixing strategy's [`Mixing::min_len`].
    pub fn simulate_with_rng<R: Rng + ?Sized>(
        &mut self,
        k: Option<usize>,
        nshuffle: usize,
        rng: &mut R,
    ) -> Result<Dataset> {
        let steps = self.cooling.steps();
        let tm_max = self.cooling.tm_max();

        if nshuffle < 2 {
            return Err(AnnealError::ShuffleTooSmall { n: nshuffle });
        }
        let len = k.unwrap_or(self.data.len());
        if len > self.data.len() {
            return Err(AnnealError::SubsampleTooLarge {
                requested: len,
                available: self.data.len(),
            });
        }
        let needed = self.mixing.min_len(nshuffle);
        if steps > 0 && needed > len {
            return Err(AnnealError::ShuffleTooLarge { n: needed, len });
        }

        let span = debug_span!("simulate", steps, ?k, nshuffle);
        let _enter = span.enter();

        self.temperature = tm_max;
        self.history.clear();
        self.stats = RunStats::default();

        let working = match k {
            Some(_) => self.nucleate(k, rng)?,
            None => self.data.clone(),
        };

        let mut index: Vec<usize> = (0..working.len()).collect();
        let mut best_index = index.clone();
        let mut best = self.fitness.performance(&working);
        let mut data = working.clone();
        self.stats.initial_performance = best;

        for step in 0..steps {
            self.mixing.mix(&mut index, nshuffle, rng)?;
            let candidate_data = working.select(&index)?;
            let candidate = self.fitness.performance(&candidate_data);
            self.temperature = self.cooling.cool(step);

            let improving = candidate <= best;
            if improving || rng.random::<f64>() * tm_max < self.temperature {
                debug!(
                    iteration = step,
                    performance = candidate,
                    temperature = self.temperature,
                    "accepted"
                );
                self.stats.accepted_moves += 1;
                if improving {
                    self.stats.improving_moves += 1;
                } else {
                    self.stats.escapes += 1;
                }

                best = candidate;
                best_index.copy_from_slice(&index);
                data = candidate_data;
                self.history.push(Sample {
                    iteration: step,
                    order: data.clone(),
                    performance: best,
                });
            } else {
                index.copy_from_slice(&best_index);
            }
            self.stats.iterations += 1;
        }

        self.stats.final_performance = best;
        self.stats.final_temperature = self.temperature;

        info!(
            iterations = self.stats.iterations,
            accepted = self.stats.accepted_moves,
            escapes = self.stats.escapes,
            initial = self.stats.initial_performance,
            performance = best,
            "annealing finished"
        );

        Ok(data)
    }
}
