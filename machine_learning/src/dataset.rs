use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use model::{FEATURES, FeatureVector, NUM_FEATURES};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::Rng;

use crate::{MlErr, Result};

/// The default name of the target column, the median home value.
pub const DEFAULT_TARGET: &str = "MEDV";

/// A regression dataset whose columns follow the order of `FEATURES`.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, one row per sample and one column per feature.
    /// * `y` - The target of each sample.
    ///
    /// # Returns
    /// A new `Dataset` or an error if the shapes don't line up.
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> Result<Self> {
        if x.ncols() != NUM_FEATURES {
            return Err(MlErr::SizeMismatch {
                what: "feature columns",
                got: x.ncols(),
                expected: NUM_FEATURES,
            });
        }

        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "targets",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        if y.is_empty() {
            return Err(MlErr::EmptyDataset);
        }

        Ok(Self { x, y })
    }

    /// Opens and parses a delimited dataset file.
    ///
    /// # Arguments
    /// * `path` - The dataset file.
    /// * `target` - The name of the target column.
    ///
    /// # Returns
    /// The parsed dataset or the first problem found in the file.
    pub fn from_path<P: AsRef<Path>>(path: P, target: &str) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), target)
    }

    /// Parses a delimited dataset.
    ///
    /// The first non blank line is the header. Cells are separated by commas, or by whitespace
    /// when a line has no commas. Columns are picked by name, any column that is neither a
    /// feature nor the target is skipped. Blank lines and lines starting with `#` are ignored.
    ///
    /// # Arguments
    /// * `reader` - Where to read the dataset from.
    /// * `target` - The name of the target column.
    ///
    /// # Returns
    /// The parsed dataset or the first problem found in the input.
    pub fn from_reader<R: BufRead>(reader: R, target: &str) -> Result<Self> {
        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(i, line)| line.map(|line| (i + 1, line)))
            .filter(|line| match line {
                Ok((_, line)) => {
                    let line = line.trim();
                    !line.is_empty() && !line.starts_with('#')
                }
                Err(_) => true,
            });

        let Some(header) = lines.next() else {
            return Err(MlErr::EmptyDataset);
        };
        let (_, header) = header?;
        let header: Vec<String> = split_cells(&header)
            .map(|cell| cell.trim_matches('"').to_string())
            .collect();

        let column_of = |name: &str| {
            header
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| MlErr::MissingColumn(name.to_string()))
        };

        let feature_columns = FEATURES
            .into_iter()
            .map(column_of)
            .collect::<Result<Vec<_>>>()?;
        let target_column = column_of(target)?;

        let mut x = Vec::new();
        let mut y = Vec::new();

        for line in lines {
            let (number, line) = line?;
            let cells: Vec<&str> = split_cells(&line).collect();

            if cells.len() != header.len() {
                return Err(MlErr::RaggedRow {
                    line: number,
                    got: cells.len(),
                    expected: header.len(),
                });
            }

            let cell = |column: usize| {
                cells[column]
                    .parse::<f64>()
                    .map_err(|_| MlErr::InvalidCell {
                        line: number,
                        column: header[column].clone(),
                        value: cells[column].to_string(),
                    })
            };

            for &column in &feature_columns {
                x.push(cell(column)?);
            }
            y.push(cell(target_column)?);
        }

        let rows = y.len();
        let x = Array2::from_shape_vec((rows, NUM_FEATURES), x).map_err(|_| {
            MlErr::SizeMismatch {
                what: "feature matrix",
                got: rows,
                expected: rows * NUM_FEATURES,
            }
        })?;

        Self::new(x, Array1::from(y))
    }

    /// Returns the amount of samples in the dataset.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Returns the features of a single sample, `None` if `index` is out of bounds.
    pub fn features(&self, index: usize) -> Option<FeatureVector> {
        (index < self.len()).then(|| self.row(index))
    }

    /// Picks the features of one sample uniformly at random.
    ///
    /// # Arguments
    /// * `rng` - The random source, seed it to get the same sample on every run.
    ///
    /// # Returns
    /// The features of the picked sample.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> FeatureVector {
        self.row(rng.random_range(0..self.len()))
    }

    fn row(&self, index: usize) -> FeatureVector {
        let mut values = [0.0; NUM_FEATURES];
        for (slot, value) in values.iter_mut().zip(self.x.row(index)) {
            *slot = *value;
        }

        FeatureVector::new(values)
    }
}

fn split_cells(line: &str) -> Box<dyn Iterator<Item = &str> + '_> {
    if line.contains(',') {
        Box::new(line.split(',').map(str::trim))
    } else {
        Box::new(line.split_whitespace())
    }
}
