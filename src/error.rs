use thiserror::Error;

/// Closed classification of everything the regression engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fewer than three observations have been trained.
    InsufficientData,
    /// More model terms than observations.
    Underdetermined,
    /// Rank-deficient design matrix (near-zero pivot).
    SingularMatrix,
    /// Prediction requested before a successful fit.
    NotReady,
    /// Caller broke an input contract (bad index, ragged input).
    PreconditionViolation,
}

/// Errors produced by the regression core.
///
/// Contract violations (out-of-range cross indices, ragged inputs) are
/// returned as values like everything else; the core never panics on caller
/// input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    #[error("not enough data points: {observations} trained, at least {required} required")]
    InsufficientData { observations: usize, required: usize },

    #[error("not enough observations ({observations}) to support {terms} model terms")]
    Underdetermined { observations: usize, terms: usize },

    #[error("design matrix is singular or ill-conditioned (pivot {pivot:e} in column {column})")]
    SingularMatrix { column: usize, pivot: f64 },

    #[error("regression has not been fit yet")]
    NotFitted,

    #[error("feature cross `{cross}` reads variable {index}, but only {available} variables were given")]
    CrossIndexOutOfRange {
        cross: String,
        index: usize,
        available: usize,
    },

    #[error("observation {row} has {found} variables, expected {expected}")]
    VariableCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("observation {row} carries {found} cross values, expected {expected}")]
    CrossCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("observed column {index} is out of range for a table with {columns} columns")]
    ObservedColumnOutOfRange { index: usize, columns: usize },

    #[error("table row {row} has {found} columns, expected {expected}")]
    RaggedTable {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl RegressionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegressionError::InsufficientData { .. } => ErrorKind::InsufficientData,
            RegressionError::Underdetermined { .. } => ErrorKind::Underdetermined,
            RegressionError::SingularMatrix { .. } => ErrorKind::SingularMatrix,
            RegressionError::NotFitted => ErrorKind::NotReady,
            RegressionError::CrossIndexOutOfRange { .. }
            | RegressionError::VariableCountMismatch { .. }
            | RegressionError::CrossCountMismatch { .. }
            | RegressionError::ObservedColumnOutOfRange { .. }
            | RegressionError::RaggedTable { .. } => ErrorKind::PreconditionViolation,
        }
    }
}

/// Error surfaced by the `regress` binary: a message plus the process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<RegressionError> for AppError {
    fn from(err: RegressionError) -> Self {
        let exit_code = match err.kind() {
            ErrorKind::PreconditionViolation => 2,
            ErrorKind::InsufficientData | ErrorKind::Underdetermined => 3,
            ErrorKind::SingularMatrix | ErrorKind::NotReady => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}
