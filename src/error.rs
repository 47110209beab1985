//! Error types for the celebration solver and the year form.

use thiserror::Error;

/// Failure of a celebration-time computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The requested year cannot be reached from the anchor
    /// (before the anchor, or outside the representable calendar).
    #[error("domain error: {0}")]
    Domain(String),

    /// The fixed schedule or anchor is degenerate and can never advance.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The replay exhausted its phase budget without finding the target.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SolveError {
    /// Domain errors are meant for the person who typed the year.
    /// The other variants mean the compiled-in constants are broken.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, SolveError::Domain(_))
    }
}

/// Rejection of raw year text before it reaches the solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("year must be a number, got \"{0}\"")]
    NotANumber(String),

    #[error("year must be between {min} and {max}, got {year}")]
    OutOfRange { year: i64, min: i32, max: i32 },
}

pub type SolveResult<T> = Result<T, SolveError>;
