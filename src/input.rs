/// Year form validation
///
/// Checks raw user input before it reaches the solver: the text must be an
/// integer and fall inside the accepted range.

use crate::error::InputError;

pub const MIN_YEAR: i32 = 2021;
pub const MAX_YEAR: i32 = 9999;
pub const DEFAULT_YEAR: i32 = 2025;

/// Inclusive range of years the form accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: MIN_YEAR,
            max: MAX_YEAR,
        }
    }
}

impl YearBounds {
    pub fn contains(&self, year: i64) -> bool {
        year >= i64::from(self.min) && year <= i64::from(self.max)
    }
}

/// Parse a year typed by the user.
/// Surrounding whitespace is ignored; anything else non-numeric is rejected.
pub fn parse_year(raw: &str, bounds: YearBounds) -> Result<i32, InputError> {
    let trimmed = raw.trim();
    let year: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;

    if !bounds.contains(year) {
        return Err(InputError::OutOfRange {
            year,
            min: bounds.min,
            max: bounds.max,
        });
    }

    // In range of two i32 bounds, so it fits
    i32::try_from(year).map_err(|_| InputError::NotANumber(trimmed.to_string()))
}
