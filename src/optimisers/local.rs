use tracing::debug;

use crate::core::Estimator;
use crate::types::DataMatrix;

/// Least squares optimizer that refits the model using all inliers.
///
/// Falls back to returning the original model when the consensus set is too
/// small or the refit is degenerate.
pub struct LeastSquaresOptimizer<E>
where
    E: Estimator,
{
    estimator: E,
}

impl<E> LeastSquaresOptimizer<E>
where
    E: Estimator,
{
    pub fn new(estimator: E) -> Self {
        Self { estimator }
    }
}

impl<E> super::LocalOptimizer<E::Model> for LeastSquaresOptimizer<E>
where
    E: Estimator,
{
    fn run(&mut self, data: &DataMatrix, inliers: &[usize], model: &E::Model) -> E::Model {
        if inliers.len() < self.estimator.sample_size() {
            return model.clone();
        }

        match self.estimator.estimate_model(data, inliers) {
            Ok(refined) => refined,
            Err(err) => {
                debug!(%err, inliers = inliers.len(), "refit failed, keeping trial model");
                model.clone()
            }
        }
    }
}
