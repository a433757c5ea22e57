use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used when loading or storing a model.
pub type Result<T> = std::result::Result<T, ModelErr>;

/// Reasons a JSON value could not be projected onto the feature vector.
///
/// The variants only matter for diagnostics, callers of the service see a
/// single error envelope regardless of the cause.
#[derive(Debug)]
pub enum FeatureErr {
    MalformedBody(serde_json::Error),
    NotAnObject { got: &'static str },
    MissingKey(&'static str),
    NotNumeric { key: &'static str, got: String },
}

impl Display for FeatureErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureErr::MalformedBody(e) => write!(f, "the body is not valid json: {e}"),
            FeatureErr::NotAnObject { got } => {
                write!(f, "expected a json object, got {got}")
            }
            FeatureErr::MissingKey(key) => write!(f, "the required feature {key} is missing"),
            FeatureErr::NotNumeric { key, got } => {
                write!(f, "the feature {key} is not numeric, got {got}")
            }
        }
    }
}

impl Error for FeatureErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FeatureErr::MalformedBody(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FeatureErr {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedBody(value)
    }
}

/// Failures while reading or writing a model artifact.
#[derive(Debug)]
pub enum ModelErr {
    Io(io::Error),
    Format(serde_json::Error),
    FeatureMismatch { got: Vec<String> },
    CoefficientCount { got: usize, expected: usize },
}

impl Display for ModelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelErr::Io(e) => write!(f, "io error: {e}"),
            ModelErr::Format(e) => write!(f, "malformed model artifact: {e}"),
            ModelErr::FeatureMismatch { got } => write!(
                f,
                "the model was trained on the features {got:?}, expected {:?}",
                crate::FEATURES
            ),
            ModelErr::CoefficientCount { got, expected } => write!(
                f,
                "the model has {got} coefficients, expected {expected}"
            ),
        }
    }
}

impl Error for ModelErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelErr::Io(e) => Some(e),
            ModelErr::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ModelErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ModelErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Format(value)
    }
}
