use crate::FeatureVector;

/// The capability of turning a feature vector into a single prediction.
///
/// Implementors must be deterministic and safe to share between request handlers without any
/// locking.
pub trait Predictor: Send + Sync {
    /// Predicts the target value for the given features.
    ///
    /// # Arguments
    /// * `features` - The ordered feature vector.
    ///
    /// # Returns
    /// The prediction, no range is enforced.
    fn predict(&self, features: &FeatureVector) -> f64;
}

impl<F> Predictor for F
where
    F: Fn(&FeatureVector) -> f64 + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> f64 {
        self(features)
    }
}
