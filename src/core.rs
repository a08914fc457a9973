//! Core RANSAC traits and pipeline.
//!
//! The pipeline is split along the same seams as classic RANSAC
//! implementations:
//! - [`Estimator`] turns an index sample into a model hypothesis.
//! - [`Sampler`] draws index samples.
//! - [`Scoring`] classifies every point against a hypothesis.
//! - [`LocalOptimizer`](crate::optimisers::LocalOptimizer) refits the winning
//!   hypothesis once the trial loop is over.
//!
//! [`Ransac`] orchestrates these components and keeps the running best as a
//! single [`Consensus`] value that is only ever replaced as a whole.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::optimisers::LocalOptimizer;
use crate::scoring::Score;
use crate::settings::RansacSettings;
use crate::types::{inlier_indices, DataMatrix, InlierMask};

/// Estimator responsible for generating model hypotheses from samples.
pub trait Estimator {
    /// Model type produced by this estimator.
    type Model: Clone;

    /// Size of a minimal sample for this estimator.
    fn sample_size(&self) -> usize;

    /// Check whether a given sample can determine a unique model.
    fn is_valid_sample(&self, data: &DataMatrix, sample: &[usize]) -> bool;

    /// Estimate a model from a sample of at least `sample_size` rows.
    ///
    /// Larger samples are solved in the least-squares sense. Numerically
    /// degenerate samples yield [`Error::DegenerateSample`].
    fn estimate_model(&self, data: &DataMatrix, sample: &[usize]) -> Result<Self::Model>;
}

/// Sampler responsible for drawing samples from the data.
pub trait Sampler {
    /// Draw a sample of `sample_size` row indices into `out_indices`.
    ///
    /// Returns `false` if no sample could be drawn (e.g. empty data).
    fn sample(&mut self, data: &DataMatrix, sample_size: usize, out_indices: &mut [usize]) -> bool;
}

/// Scoring strategy used to evaluate a model and classify the points.
pub trait Scoring<M> {
    /// Inlier/outlier threshold for residuals.
    fn threshold(&self) -> f64;

    /// Score a model, writing one inlier flag per data row into `mask_out`.
    fn score(&self, data: &DataMatrix, model: &M, mask_out: &mut InlierMask) -> Score;
}

/// Best hypothesis found by a RANSAC run together with its consensus set.
#[derive(Debug, Clone, PartialEq)]
pub struct Consensus<M> {
    pub model: M,
    pub inlier_mask: InlierMask,
    pub score: Score,
}

impl<M> Consensus<M> {
    /// Row indices flagged as inliers.
    pub fn inlier_indices(&self) -> Vec<usize> {
        inlier_indices(&self.inlier_mask)
    }
}

/// Acceptance rule for a trial score.
///
/// The count must strictly exceed `min_inliers` and strictly beat the
/// incumbent, so the first trial to reach a count keeps it.
fn is_better_model(score: &Score, min_inliers: f64, best: Option<&Score>) -> bool {
    let clears_threshold = score.inlier_count as f64 > min_inliers;
    let beats_best = match best {
        None => true,
        Some(best) => score.inlier_count > best.inlier_count,
    };
    clears_threshold && beats_best
}

/// Fit a hypothesis from one sample, rejecting degenerate samples first.
fn estimate_trial<E: Estimator>(
    estimator: &E,
    data: &DataMatrix,
    sample: &[usize],
) -> Result<E::Model> {
    if !estimator.is_valid_sample(data, sample) {
        return Err(Error::DegenerateSample {
            order: estimator.sample_size().saturating_sub(1),
        });
    }
    estimator.estimate_model(data, sample)
}

/// RANSAC pipeline orchestrating the above components.
pub struct Ransac<E, Sa, Sc, LO>
where
    E: Estimator,
    Sa: Sampler,
    Sc: Scoring<E::Model>,
    LO: LocalOptimizer<E::Model>,
{
    pub settings: RansacSettings,
    pub estimator: E,
    pub sampler: Sa,
    pub scoring: Sc,
    pub final_optimizer: Option<LO>,

    // Outputs / diagnostics
    pub best: Option<Consensus<E::Model>>,
    pub iteration: usize,
    pub degenerate_trials: usize,
}

impl<E, Sa, Sc, LO> Ransac<E, Sa, Sc, LO>
where
    E: Estimator,
    Sa: Sampler,
    Sc: Scoring<E::Model>,
    LO: LocalOptimizer<E::Model>,
{
    /// Create a new pipeline from its components.
    pub fn new(
        settings: RansacSettings,
        estimator: E,
        sampler: Sa,
        scoring: Sc,
        final_optimizer: Option<LO>,
    ) -> Self {
        Self {
            settings,
            estimator,
            sampler,
            scoring,
            final_optimizer,
            best: None,
            iteration: 0,
            degenerate_trials: 0,
        }
    }

    fn reset(&mut self) {
        self.best = None;
        self.iteration = 0;
        self.degenerate_trials = 0;
    }

    fn check_data(&self, data: &DataMatrix) -> Result<()> {
        let required = self.estimator.sample_size();
        if data.nrows() < required {
            return Err(Error::InsufficientData {
                order: required.saturating_sub(1),
                required,
                available: data.nrows(),
            });
        }
        Ok(())
    }

    fn min_inliers(&self, data: &DataMatrix) -> f64 {
        self.settings.min_inlier_fraction * data.nrows() as f64
    }

    /// Run `trial_count` trials on the given data matrix.
    ///
    /// Any previous result is discarded first. On success the refit
    /// consensus is stored in `self.best` and returned.
    pub fn run(&mut self, data: &DataMatrix) -> Result<&Consensus<E::Model>> {
        self.reset();
        self.check_data(data)?;

        let sample_size = self.estimator.sample_size();
        let min_inliers = self.min_inliers(data);
        let mut sample = vec![0usize; sample_size];
        let mut mask = InlierMask::with_capacity(data.nrows());
        let mut best: Option<Consensus<E::Model>> = None;

        for trial in 0..self.settings.trial_count {
            self.iteration = trial + 1;

            if !self.sampler.sample(data, sample_size, &mut sample) {
                self.degenerate_trials += 1;
                continue;
            }

            let model = match estimate_trial(&self.estimator, data, &sample) {
                Ok(model) => model,
                Err(err) => {
                    trace!(trial, ?sample, %err, "skipping trial");
                    self.degenerate_trials += 1;
                    continue;
                }
            };

            let score = self.scoring.score(data, &model, &mut mask);
            if is_better_model(&score, min_inliers, best.as_ref().map(|b| &b.score)) {
                debug!(trial, inliers = score.inlier_count, "new best consensus");
                best = Some(Consensus {
                    model,
                    inlier_mask: mask.clone(),
                    score,
                });
            }
        }

        self.finish(data, best)
    }

    /// Apply the final refit and publish the result.
    fn finish(
        &mut self,
        data: &DataMatrix,
        best: Option<Consensus<E::Model>>,
    ) -> Result<&Consensus<E::Model>> {
        let trials = self.settings.trial_count;
        let Some(mut consensus) = best else {
            debug!(
                trials,
                degenerate = self.degenerate_trials,
                "no trial reached the consensus threshold"
            );
            return Err(Error::NoFitFound { trials });
        };

        if let Some(final_opt) = &mut self.final_optimizer {
            let inliers = consensus.inlier_indices();
            consensus.model = final_opt.run(data, &inliers, &consensus.model);
        }

        debug!(
            trials,
            degenerate = self.degenerate_trials,
            inliers = consensus.score.inlier_count,
            "ransac finished"
        );
        Ok(&*self.best.insert(consensus))
    }
}

#[cfg(feature = "parallel")]
impl<E, Sa, Sc, LO> Ransac<E, Sa, Sc, LO>
where
    E: Estimator + Sync,
    E::Model: Send,
    Sa: Sampler,
    Sc: Scoring<E::Model> + Sync,
    LO: LocalOptimizer<E::Model>,
{
    /// Parallel variant of [`Ransac::run`].
    ///
    /// All samples are drawn up-front from the single sampler stream, so
    /// trial `i` sees the same indices as in a sequential run. Trials are
    /// scored on the rayon pool and the best one is picked by a sequential
    /// reduction in trial order, which yields the same result as `run`.
    pub fn run_parallel(&mut self, data: &DataMatrix) -> Result<&Consensus<E::Model>> {
        use rayon::prelude::*;

        self.reset();
        self.check_data(data)?;

        let sample_size = self.estimator.sample_size();
        let min_inliers = self.min_inliers(data);
        let trial_count = self.settings.trial_count;

        let mut samples: Vec<Option<Vec<usize>>> = Vec::with_capacity(trial_count);
        for _ in 0..trial_count {
            let mut sample = vec![0usize; sample_size];
            let drawn = self.sampler.sample(data, sample_size, &mut sample);
            samples.push(drawn.then_some(sample));
        }

        let estimator = &self.estimator;
        let scoring = &self.scoring;
        let trials: Vec<Option<(E::Model, Score)>> = samples
            .par_iter()
            .map_init(
                || InlierMask::with_capacity(data.nrows()),
                |mask, sample| {
                    let model = estimate_trial(estimator, data, sample.as_deref()?).ok()?;
                    let score = scoring.score(data, &model, mask);
                    Some((model, score))
                },
            )
            .collect();

        self.iteration = trial_count;
        self.degenerate_trials = trials.iter().filter(|t| t.is_none()).count();

        let mut winner: Option<(usize, E::Model, Score)> = None;
        for (trial, (model, score)) in trials
            .into_iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (i, t)))
        {
            if is_better_model(&score, min_inliers, winner.as_ref().map(|w| &w.2)) {
                debug!(trial, inliers = score.inlier_count, "new best consensus");
                winner = Some((trial, model, score));
            }
        }

        let best = winner.map(|(_, model, score)| {
            let mut inlier_mask = InlierMask::with_capacity(data.nrows());
            self.scoring.score(data, &model, &mut inlier_mask);
            Consensus {
                model,
                inlier_mask,
                score,
            }
        });

        self.finish(data, best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::estimators::PolynomialEstimator;
    use crate::models::Polynomial;
    use crate::optimisers::LeastSquaresOptimizer;
    use crate::scoring::InlierCountScoring;

    /// Sampler replaying a fixed list of samples, one per trial.
    struct ScriptedSampler {
        samples: Vec<Vec<usize>>,
        calls: usize,
    }

    impl ScriptedSampler {
        fn new(samples: Vec<Vec<usize>>) -> Self {
            Self { samples, calls: 0 }
        }
    }

    impl Sampler for ScriptedSampler {
        fn sample(
            &mut self,
            _data: &DataMatrix,
            sample_size: usize,
            out_indices: &mut [usize],
        ) -> bool {
            let next = &self.samples[self.calls % self.samples.len()];
            self.calls += 1;
            out_indices[..sample_size].copy_from_slice(&next[..sample_size]);
            true
        }
    }

    fn data_from(xs: &[f64], ys: &[f64]) -> DataMatrix {
        let mut data = DataMatrix::zeros(xs.len(), 2);
        for (i, (x, y)) in xs.iter().zip(ys).enumerate() {
            data[(i, 0)] = *x;
            data[(i, 1)] = *y;
        }
        data
    }

    type TestRansac = Ransac<
        PolynomialEstimator,
        ScriptedSampler,
        InlierCountScoring<Polynomial>,
        LeastSquaresOptimizer<PolynomialEstimator>,
    >;

    fn pipeline(
        order: usize,
        trials: usize,
        tolerance: f64,
        fraction: f64,
        samples: Vec<Vec<usize>>,
    ) -> TestRansac {
        let settings = RansacSettings::new(trials, tolerance, fraction).unwrap();
        Ransac::new(
            settings,
            PolynomialEstimator::new(order),
            ScriptedSampler::new(samples),
            InlierCountScoring::polynomial(tolerance),
            Some(LeastSquaresOptimizer::new(PolynomialEstimator::new(order))),
        )
    }

    #[test]
    fn ties_keep_the_first_trial() {
        let data = data_from(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 0.0, 5.0, 5.0, 9.0]);
        // Trial 0 picks y=5 (inliers 2,3); trial 1 picks y=0 (inliers 0,1) and ties.
        let mut ransac = pipeline(0, 2, 0.5, 0.2, vec![vec![2], vec![0]]);

        let best = ransac.run(&data).unwrap();
        assert_eq!(best.inlier_mask, vec![false, false, true, true, false]);
        assert_eq!(best.score.inlier_count, 2);
        assert!((best.model.coefficients()[0] - 5.0).abs() < 1e-12);
        assert_eq!(ransac.iteration, 2);
    }

    #[test]
    fn strictly_larger_count_replaces_incumbent() {
        let data = data_from(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 0.0, 0.0, 5.0, 9.0]);
        let mut ransac = pipeline(0, 2, 0.5, 0.1, vec![vec![3], vec![1]]);

        let best = ransac.run(&data).unwrap();
        assert_eq!(best.inlier_mask, vec![true, true, true, false, false]);
        assert_eq!(best.score.inlier_count, 3);
    }

    #[test]
    fn acceptance_threshold_is_strict() {
        // 2 inliers out of 4 with fraction 0.5 is not enough.
        let data = data_from(&[0.0, 1.0, 2.0, 3.0], &[1.0, 1.0, 7.0, 9.0]);
        let mut ransac = pipeline(0, 3, 0.5, 0.5, vec![vec![0]]);

        let err = ransac.run(&data).unwrap_err();
        assert_eq!(err, Error::NoFitFound { trials: 3 });
        assert!(ransac.best.is_none());
    }

    #[test]
    fn degenerate_samples_are_skipped_and_counted() {
        let data = data_from(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0]);
        // The first sample repeats an index and cannot define a line.
        let mut ransac = pipeline(1, 2, 0.1, 0.5, vec![vec![2, 2], vec![0, 3]]);

        let best = ransac.run(&data).unwrap();
        assert_eq!(best.inlier_mask, vec![true; 4]);
        assert!((best.model.coefficients()[0] - 1.0).abs() < 1e-9);
        assert!((best.model.coefficients()[1] - 2.0).abs() < 1e-9);
        assert_eq!(ransac.degenerate_trials, 1);
    }

    #[test]
    fn final_refit_uses_the_whole_consensus_set() {
        // Inliers scatter around y = 1; the minimal sample hits y = 1.2.
        let data = data_from(
            &[0.0, 1.0, 2.0, 3.0, 4.0],
            &[1.2, 0.8, 1.1, 0.9, 40.0],
        );
        let mut ransac = pipeline(0, 1, 0.5, 0.5, vec![vec![0]]);

        let best = ransac.run(&data).unwrap();
        assert_eq!(best.inlier_mask, vec![true, true, true, true, false]);
        assert!((best.model.coefficients()[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn insufficient_data_is_rejected_before_sampling() {
        let data = data_from(&[0.0, 1.0], &[0.0, 1.0]);
        let mut ransac = pipeline(2, 5, 0.5, 0.0, vec![vec![0, 1, 0]]);

        let err = ransac.run(&data).unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientData {
                order: 2,
                required: 3,
                available: 2
            }
        );
        assert_eq!(ransac.sampler.calls, 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_run_matches_sequential_run() {
        use crate::samplers::UniformRandomSampler;

        let xs: Vec<f64> = (0..60).map(|i| i as f64 * 0.5).collect();
        let ys: Vec<f64> = xs
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let y = 2.0 - 0.5 * x + 0.1 * x * x;
                if i % 4 == 0 { y + 30.0 } else { y }
            })
            .collect();
        let data = data_from(&xs, &ys);

        let build = || {
            let settings = RansacSettings::new(80, 0.25, 0.5).unwrap();
            Ransac::new(
                settings,
                PolynomialEstimator::new(2),
                UniformRandomSampler::from_seed(11),
                InlierCountScoring::polynomial(0.25),
                Some(LeastSquaresOptimizer::new(PolynomialEstimator::new(2))),
            )
        };

        let mut sequential = build();
        let mut parallel = build();
        let a = sequential.run(&data).unwrap().clone();
        let b = parallel.run_parallel(&data).unwrap().clone();
        assert_eq!(a, b);
        assert_eq!(sequential.degenerate_trials, parallel.degenerate_trials);
    }
}
