use model::Predictor;
use ndarray::{Array1, ArrayView1};

use crate::dataset::Dataset;

/// How well a model fits a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub mse: f64,
    pub r2: f64,
}

impl Score {
    /// Scores a predictor against every sample of a dataset.
    ///
    /// # Arguments
    /// * `predictor` - The model to evaluate.
    /// * `dataset` - The samples with their expected targets.
    ///
    /// # Returns
    /// The mean squared error and the coefficient of determination.
    pub fn evaluate<P: Predictor + ?Sized>(predictor: &P, dataset: &Dataset) -> Self {
        let y_pred: Array1<f64> = (0..dataset.len())
            .filter_map(|i| dataset.features(i))
            .map(|features| predictor.predict(&features))
            .collect();

        Self {
            mse: mse(y_pred.view(), dataset.y()),
            r2: r2(y_pred.view(), dataset.y()),
        }
    }
}

/// Mean squared error.
pub fn mse(y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    (&y_pred - &y)
        .mapv(|x| x.powi(2))
        .mean()
        .unwrap_or_default()
}

/// Coefficient of determination.
///
/// A constant target scores 1 when it is matched exactly and 0 otherwise.
pub fn r2(y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let mean = y.mean().unwrap_or_default();
    let ss_res = (&y_pred - &y).mapv(|x| x.powi(2)).sum();
    let ss_tot = y.mapv(|x| (x - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn perfect_predictions() {
        let y = array![1.0, 2.0, 3.0];

        assert_eq!(mse(y.view(), y.view()), 0.0);
        assert_eq!(r2(y.view(), y.view()), 1.0);
    }

    #[test]
    fn predicting_the_mean_scores_zero() {
        let y = array![1.0, 2.0, 3.0];
        let y_pred = array![2.0, 2.0, 2.0];

        assert!((mse(y_pred.view(), y.view()) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(r2(y_pred.view(), y.view()), 0.0);
    }

    #[test]
    fn constant_target() {
        let y = array![5.0, 5.0];

        assert_eq!(r2(y.view(), y.view()), 1.0);
        assert_eq!(r2(array![4.0, 6.0].view(), y.view()), 0.0);
    }
}
