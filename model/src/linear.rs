use std::{fs, path::Path};

use log::debug;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::{FEATURES, FeatureVector, ModelErr, NUM_FEATURES, Predictor, Result};

/// A fitted linear regression: `intercept + coefficients · x`.
///
/// This is also the on-disk artifact format, `features` records the column order the
/// coefficients were fitted against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    features: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Creates a new `LinearModel` over the service's feature schema.
    ///
    /// # Arguments
    /// * `coefficients` - One coefficient per feature, ordered as in `FEATURES`.
    /// * `intercept` - The bias term.
    ///
    /// # Returns
    /// A new `LinearModel` instance.
    pub fn new(coefficients: [f64; NUM_FEATURES], intercept: f64) -> Self {
        Self {
            features: FEATURES.iter().map(|name| name.to_string()).collect(),
            coefficients: coefficients.to_vec(),
            intercept,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Reads and validates a model artifact.
    ///
    /// # Arguments
    /// * `path` - Where the artifact lives.
    ///
    /// # Returns
    /// The loaded model.
    ///
    /// # Errors
    /// Returns a `ModelErr` if the file can't be read or parsed, or if it was trained on a
    /// different feature set than `FEATURES`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read(path.as_ref())?;
        let model: Self = serde_json::from_slice(&raw)?;
        model.validate()?;

        debug!(
            path:? = path.as_ref(),
            intercept = model.intercept;
            "loaded linear model"
        );

        Ok(model)
    }

    /// Writes this model as a json artifact.
    ///
    /// # Arguments
    /// * `path` - Where to write the artifact, overwriting anything in there.
    ///
    /// # Errors
    /// Returns a `ModelErr` if serializing or writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let raw = serde_json::to_vec_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.features.iter().map(String::as_str).ne(FEATURES) {
            return Err(ModelErr::FeatureMismatch {
                got: self.features.clone(),
            });
        }

        if self.coefficients.len() != NUM_FEATURES {
            return Err(ModelErr::CoefficientCount {
                got: self.coefficients.len(),
                expected: NUM_FEATURES,
            });
        }

        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let w = ArrayView1::from(&self.coefficients[..]);
        let x = ArrayView1::from(features.as_slice());
        self.intercept + w.dot(&x)
    }
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    const CHAS_ONLY: [f64; NUM_FEATURES] = [
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ];

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("model-{}-{name}.json", process::id()))
    }

    #[test]
    fn predict_is_intercept_plus_dot_product() {
        let model = LinearModel::new(CHAS_ONLY, 10.0);

        let mut x = [1.0; NUM_FEATURES];
        x[3] = 5.0;

        assert_eq!(model.predict(&FeatureVector::new(x)), 15.0);
        assert_eq!(model.predict(&FeatureVector::new([0.0; NUM_FEATURES])), 10.0);
    }

    #[test]
    fn predict_is_deterministic() {
        let model = LinearModel::new([0.1; NUM_FEATURES], -3.5);
        let x = FeatureVector::new([2.5; NUM_FEATURES]);

        assert_eq!(model.predict(&x).to_bits(), model.predict(&x).to_bits());
    }

    #[test]
    fn saved_model_loads_back() {
        let path = temp_path("roundtrip");
        let model = LinearModel::new([0.25; NUM_FEATURES], 36.45);

        model.save(&path).unwrap();
        let loaded = LinearModel::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, model);
    }

    #[test]
    fn reordered_features_are_rejected() {
        let path = temp_path("reordered");
        let mut model = LinearModel::new([0.0; NUM_FEATURES], 0.0);
        model.features.swap(0, 1);

        model.save(&path).unwrap();
        let err = LinearModel::load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, ModelErr::FeatureMismatch { .. }));
    }

    #[test]
    fn wrong_coefficient_count_is_rejected() {
        let path = temp_path("short");
        let mut model = LinearModel::new([0.0; NUM_FEATURES], 0.0);
        model.coefficients.pop();

        model.save(&path).unwrap();
        let err = LinearModel::load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            err,
            ModelErr::CoefficientCount {
                got: 12,
                expected: NUM_FEATURES
            }
        ));
    }

    #[test]
    fn missing_artifact_is_an_io_error() {
        let err = LinearModel::load(temp_path("does-not-exist")).unwrap_err();
        assert!(matches!(err, ModelErr::Io(_)));
    }

    #[test]
    fn garbage_artifact_is_a_format_error() {
        let path = temp_path("garbage");
        fs::write(&path, b"\x80\x04pickle").unwrap();

        let err = LinearModel::load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, ModelErr::Format(_)));
    }
}
