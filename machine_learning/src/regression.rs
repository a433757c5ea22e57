use log::debug;
use model::{LinearModel, NUM_FEATURES};
use ndarray::{Array1, Array2, Axis};

use crate::{MlErr, Result, dataset::Dataset};

/// Pivots below this value are treated as zero. Columns are scaled to unit norm before solving,
/// so this is relative to a diagonal of ones.
const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Ordinary least squares with an intercept.
#[derive(Debug, Clone, Copy)]
pub struct LinearRegression {
    tolerance: f64,
}

impl LinearRegression {
    /// Returns a new `LinearRegression`.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Returns a new `LinearRegression` with a custom rank tolerance.
    ///
    /// # Arguments
    /// * `tolerance` - Pivots of the scaled normal equations at or below this value are
    ///   considered zero and their coefficient is fixed to zero.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Fits a linear model minimizing the squared error over the dataset.
    ///
    /// The data is centered so the intercept can be recovered from the means, and each column is
    /// scaled to unit norm before solving the normal equations. Columns without variance, or
    /// exactly collinear with previous ones, get a zero coefficient.
    ///
    /// # Arguments
    /// * `dataset` - The samples to fit.
    ///
    /// # Returns
    /// The fitted model or an error if the dataset is unusable.
    pub fn fit(&self, dataset: &Dataset) -> Result<LinearModel> {
        let x = dataset.x();
        let y = dataset.y();

        let x_mean = x.mean_axis(Axis(0)).ok_or(MlErr::EmptyDataset)?;
        let y_mean = y.mean().ok_or(MlErr::EmptyDataset)?;

        let xc = &x - &x_mean;
        let yc = &y - y_mean;

        let scale = xc
            .map_axis(Axis(0), |col| col.dot(&col).sqrt())
            .mapv(|norm| if norm > 0.0 { norm } else { 1.0 });
        let xs = &xc / &scale;

        let gram = xs.t().dot(&xs);
        let moment = xs.t().dot(&yc);

        let (w, rank) = solve(gram, moment, self.tolerance);
        let w = &w / &scale;
        let intercept = y_mean - w.dot(&x_mean);

        debug!(rank = rank, samples = dataset.len(); "solved normal equations");

        let got = w.len();
        let coefficients: [f64; NUM_FEATURES] =
            w.to_vec()
                .try_into()
                .map_err(|_| MlErr::SizeMismatch {
                    what: "coefficients",
                    got,
                    expected: NUM_FEATURES,
                })?;

        Ok(LinearModel::new(coefficients, intercept))
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

/// Solves the square system `a · w = b` by gaussian elimination with partial pivoting.
///
/// Columns whose best pivot is at or below `tolerance` are skipped and their unknown is left at
/// zero, which still yields a solution when the system is consistent (as normal equations are).
///
/// # Returns
/// The solution and the amount of pivots used, that is, the numerical rank of `a`.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>, tolerance: f64) -> (Array1<f64>, usize) {
    let n = b.len();
    let mut pivots = Vec::with_capacity(n);
    let mut row = 0;

    for col in 0..n {
        if row == n {
            break;
        }

        let (best, magnitude) = (row..n)
            .map(|r| (r, a[[r, col]].abs()))
            .fold((row, 0.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });

        if magnitude <= tolerance {
            continue;
        }

        if best != row {
            for c in 0..n {
                a.swap([best, c], [row, c]);
            }
            b.swap(best, row);
        }

        for r in row + 1..n {
            let factor = a[[r, col]] / a[[row, col]];
            if factor == 0.0 {
                continue;
            }

            for c in col..n {
                a[[r, c]] -= factor * a[[row, c]];
            }
            b[r] -= factor * b[row];
        }

        pivots.push((row, col));
        row += 1;
    }

    let mut w = Array1::zeros(n);
    for &(r, c) in pivots.iter().rev() {
        let tail: f64 = (c + 1..n).map(|j| a[[r, j]] * w[j]).sum();
        w[c] = (b[r] - tail) / a[[r, c]];
    }

    (w, pivots.len())
}
