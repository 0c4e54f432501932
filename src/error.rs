//! Crate-wide error type.
//!
//! Every fallible core function returns `AppError` directly to the caller
//! (no retries, no silent defaulting). The variants mirror the failure
//! taxonomy of the pipeline:
//!
//! - `Io`: CLI usage and file-system problems (exports, saved surfaces)
//! - `Domain`: invalid physical inputs (non-positive temperature or
//!   wavelength, mismatched array lengths, degenerate normalization)
//! - `FitConvergence`: the optimizer failed to converge or produced
//!   non-finite residuals
//! - `MetricUndefined`: a metric's denominator term is zero for at least
//!   one element
//!
//! Each variant maps to a stable process exit code so scripted callers can
//! branch on the failure class.

#[derive(Clone, PartialEq, Eq)]
pub enum AppError {
    Io(String),
    Domain(String),
    FitConvergence(String),
    MetricUndefined(String),
}

impl AppError {
    pub fn io(message: impl Into<String>) -> Self {
        AppError::Io(message.into())
    }

    pub fn domain(message: impl Into<String>) -> Self {
        AppError::Domain(message.into())
    }

    pub fn fit(message: impl Into<String>) -> Self {
        AppError::FitConvergence(message.into())
    }

    pub fn metric(message: impl Into<String>) -> Self {
        AppError::MetricUndefined(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Io(_) => 2,
            AppError::Domain(_) => 3,
            AppError::FitConvergence(_) => 4,
            AppError::MetricUndefined(_) => 5,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Io(m)
            | AppError::Domain(m)
            | AppError::FitConvergence(m)
            | AppError::MetricUndefined(m) => m,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Io(_) => "Io",
            AppError::Domain(_) => "Domain",
            AppError::FitConvergence(_) => "FitConvergence",
            AppError::MetricUndefined(_) => "MetricUndefined",
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind())
            .field("exit_code", &self.exit_code())
            .field("message", &self.message())
            .finish()
    }
}

impl std::error::Error for AppError {}
