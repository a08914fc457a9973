use crate::types::DataMatrix;

/// Refinement applied to the winning hypothesis after the trial loop.
///
/// The optimizer receives the consensus set of the winning trial and returns
/// the model to publish. It must never fail: when refinement is impossible it
/// hands back the input model unchanged.
///
/// ## Example: custom refinement
///
/// ```rust
/// use inlier_poly::optimisers::LocalOptimizer;
/// use inlier_poly::types::DataMatrix;
///
/// #[derive(Clone)]
/// struct Offset(f64);
///
/// struct MeanOffset;
///
/// impl LocalOptimizer<Offset> for MeanOffset {
///     fn run(&mut self, data: &DataMatrix, inliers: &[usize], model: &Offset) -> Offset {
///         if inliers.is_empty() {
///             return model.clone();
///         }
///         let sum: f64 = inliers.iter().map(|&i| data[(i, 1)]).sum();
///         Offset(sum / inliers.len() as f64)
///     }
/// }
/// ```
pub trait LocalOptimizer<M> {
    /// Refine `model` using the rows listed in `inliers`.
    fn run(&mut self, data: &DataMatrix, inliers: &[usize], model: &M) -> M;
}

pub mod local;

pub use local::LeastSquaresOptimizer;
