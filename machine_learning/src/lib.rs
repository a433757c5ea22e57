pub mod dataset;
pub mod error;
pub mod metrics;
pub mod regression;

pub use dataset::Dataset;
pub use error::{MlErr, Result};
pub use metrics::Score;
pub use regression::LinearRegression;
