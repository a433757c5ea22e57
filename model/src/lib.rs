pub mod error;
pub mod features;
pub mod linear;
pub mod predictor;

pub use error::{FeatureErr, ModelErr, Result};
pub use features::{FEATURES, FeatureVector, NUM_FEATURES};
pub use linear::LinearModel;
pub use predictor::Predictor;
