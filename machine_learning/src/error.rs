use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    Io(io::Error),
    EmptyDataset,
    MissingColumn(String),
    RaggedRow {
        line: usize,
        got: usize,
        expected: usize,
    },
    InvalidCell {
        line: usize,
        column: String,
        value: String,
    },
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::Io(e) => format!("io error: {e}"),
            MlErr::EmptyDataset => "The dataset has no rows".to_string(),
            MlErr::MissingColumn(column) => {
                format!("The dataset header has no {column} column")
            }
            MlErr::RaggedRow {
                line,
                got,
                expected,
            } => format!("Line {line} has {got} cells, the header declares {expected}"),
            MlErr::InvalidCell {
                line,
                column,
                value,
            } => format!("Line {line} has a non numeric {column} value {value:?}"),
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => format!("There's a size mismatch in {what}, got {got} and expected {expected}"),
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MlErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
