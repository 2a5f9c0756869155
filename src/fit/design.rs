//! Design matrix assembly.
//!
//! Given `N` observations with `v` raw variables and `k` cached cross values
//! each, builds the target vector `y` (length `N`) and the design matrix `X`
//! (`N × (1 + v + k)`): bias column, raw variables, then cross values in
//! registration order.

use nalgebra::{DMatrix, DVector};

use crate::domain::Observation;
use crate::error::RegressionError;
use crate::models::{fill_design_row, term_count};

#[derive(Debug, Clone)]
pub struct DesignMatrix {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    pub variable_count: usize,
    pub cross_count: usize,
}

impl DesignMatrix {
    /// Build `X` and `y` from observations whose crosses are already cached.
    pub fn build(observations: &[Observation]) -> Result<Self, RegressionError> {
        let Some(first) = observations.first() else {
            return Err(RegressionError::InsufficientData {
                observations: 0,
                required: 1,
            });
        };

        let v = first.variables.len();
        let k = first.crosses.len();
        for (row, obs) in observations.iter().enumerate() {
            if obs.variables.len() != v {
                return Err(RegressionError::VariableCountMismatch {
                    row,
                    expected: v,
                    found: obs.variables.len(),
                });
            }
            if obs.crosses.len() != k {
                return Err(RegressionError::CrossCountMismatch {
                    row,
                    expected: k,
                    found: obs.crosses.len(),
                });
            }
        }

        let n = observations.len();
        let p = term_count(v, k);
        if n < p {
            return Err(RegressionError::Underdetermined {
                observations: n,
                terms: p,
            });
        }

        let mut x = DMatrix::<f64>::zeros(n, p);
        let mut y = DVector::<f64>::zeros(n);
        let mut row = vec![0.0; p];

        for (i, obs) in observations.iter().enumerate() {
            fill_design_row(&obs.variables, &obs.crosses, &mut row);
            for (j, &value) in row.iter().enumerate() {
                x[(i, j)] = value;
            }
            y[i] = obs.observed;
        }

        tracing::debug!(rows = n, terms = p, variables = v, crosses = k, "built design matrix");

        Ok(Self {
            x,
            y,
            variable_count: v,
            cross_count: k,
        })
    }

    pub fn term_count(&self) -> usize {
        self.x.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(observed: f64, variables: &[f64], crosses: &[f64]) -> Observation {
        Observation {
            crosses: crosses.to_vec(),
            ..Observation::new(observed, variables)
        }
    }

    #[test]
    fn columns_are_bias_variables_then_crosses() {
        let data = vec![
            obs(10.0, &[1.0, 2.0], &[4.0]),
            obs(20.0, &[3.0, 4.0], &[16.0]),
            obs(30.0, &[5.0, 6.0], &[36.0]),
            obs(40.0, &[7.0, 8.0], &[64.0]),
        ];
        let design = DesignMatrix::build(&data).unwrap();

        assert_eq!(design.term_count(), 4);
        assert_eq!(design.variable_count, 2);
        assert_eq!(design.cross_count, 1);
        assert_eq!(design.y.as_slice(), &[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(design.x.row(1).iter().copied().collect::<Vec<_>>(), vec![1.0, 3.0, 4.0, 16.0]);
        assert_eq!(design.x.column(0).iter().copied().collect::<Vec<_>>(), vec![1.0; 4]);
    }

    #[test]
    fn too_few_rows_for_the_terms_is_underdetermined() {
        // For every (v, k), N = 1 + v + k - 1 observations must be rejected.
        for v in 0..4 {
            for k in 0..3 {
                let terms = 1 + v + k;
                let n = terms - 1;
                if n == 0 {
                    continue;
                }
                let data: Vec<Observation> = (0..n)
                    .map(|i| obs(i as f64, &vec![i as f64; v], &vec![1.0; k]))
                    .collect();
                assert_eq!(
                    DesignMatrix::build(&data).unwrap_err(),
                    RegressionError::Underdetermined { observations: n, terms },
                    "v={v} k={k}"
                );
            }
        }
    }

    #[test]
    fn mismatched_rows_are_rejected() {
        let data = vec![obs(1.0, &[1.0, 2.0], &[]), obs(2.0, &[1.0], &[])];
        assert_eq!(
            DesignMatrix::build(&data).unwrap_err(),
            RegressionError::VariableCountMismatch { row: 1, expected: 2, found: 1 }
        );

        let data = vec![obs(1.0, &[1.0], &[1.0]), obs(2.0, &[2.0], &[])];
        assert_eq!(
            DesignMatrix::build(&data).unwrap_err(),
            RegressionError::CrossCountMismatch { row: 1, expected: 1, found: 0 }
        );
    }

    #[test]
    fn empty_input_has_no_data() {
        assert!(matches!(
            DesignMatrix::build(&[]).unwrap_err(),
            RegressionError::InsufficientData { observations: 0, .. }
        ));
    }
}
