use anyhow::{bail, Context, Result};
use std::env;
#[cfg(test)]
use std::collections::HashMap;

use crate::input::{YearBounds, DEFAULT_YEAR, MAX_YEAR, MIN_YEAR};
use crate::report::OutputFormat;
use crate::schedule::ANCHOR_YEAR;

#[derive(Debug, Clone)]
pub struct Config {
    // Accepted year range for input
    pub min_year: i32,
    pub max_year: i32,

    // Year solved when none is given on the command line
    pub default_year: i32,

    // plain, full or json
    pub output: OutputFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env if present, ignore if missing
        Self::from_getter(|key| env::var(key).ok())
    }

    /// Parse config from a custom getter function (for testing)
    pub fn from_getter<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            min_year: get("PILOTCLOCK_MIN_YEAR")
                .unwrap_or_else(|| MIN_YEAR.to_string())
                .trim()
                .parse()
                .context("PILOTCLOCK_MIN_YEAR must be a year number")?,
            max_year: get("PILOTCLOCK_MAX_YEAR")
                .unwrap_or_else(|| MAX_YEAR.to_string())
                .trim()
                .parse()
                .context("PILOTCLOCK_MAX_YEAR must be a year number")?,
            default_year: get("PILOTCLOCK_DEFAULT_YEAR")
                .unwrap_or_else(|| DEFAULT_YEAR.to_string())
                .trim()
                .parse()
                .context("PILOTCLOCK_DEFAULT_YEAR must be a year number")?,
            output: get("PILOTCLOCK_OUTPUT")
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<OutputFormat>())
                .transpose()
                .context("PILOTCLOCK_OUTPUT must be one of: plain, full, json")?
                .unwrap_or_default(),
        })
    }

    /// Create config from a HashMap (convenience for testing)
    #[cfg(test)]
    pub fn from_map(map: &HashMap<&str, &str>) -> Result<Self> {
        Self::from_getter(|key| map.get(key).map(|v| v.to_string()))
    }

    pub fn bounds(&self) -> YearBounds {
        YearBounds {
            min: self.min_year,
            max: self.max_year,
        }
    }

    /// Validate configuration values at startup.
    /// Returns Ok(()) if all validations pass, or Err with details of what failed.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.min_year > self.max_year {
            errors.push(format!(
                "PILOTCLOCK_MIN_YEAR={} is after PILOTCLOCK_MAX_YEAR={}.",
                self.min_year, self.max_year
            ));
        }

        // The pilot departs at noon, so the anchor year's new year never comes
        if self.min_year <= ANCHOR_YEAR {
            errors.push(format!(
                "PILOTCLOCK_MIN_YEAR={} must be after the departure year {}.",
                self.min_year, ANCHOR_YEAR
            ));
        }

        if self.max_year > MAX_YEAR {
            errors.push(format!(
                "PILOTCLOCK_MAX_YEAR={} is too large (max supported: {}).",
                self.max_year, MAX_YEAR
            ));
        }

        if !self.bounds().contains(i64::from(self.default_year)) {
            errors.push(format!(
                "PILOTCLOCK_DEFAULT_YEAR={} is outside {}..={}.",
                self.default_year, self.min_year, self.max_year
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valid_ranges_validate(min in 2021i32..5000, span in 0i32..4999) {
            let max = min + span;
            let default = min + span / 2;
            let (min_s, max_s, def_s) = (min.to_string(), max.to_string(), default.to_string());
            let mut env: HashMap<&str, &str> = HashMap::new();
            env.insert("PILOTCLOCK_MIN_YEAR", &min_s);
            env.insert("PILOTCLOCK_MAX_YEAR", &max_s);
            env.insert("PILOTCLOCK_DEFAULT_YEAR", &def_s);
            let config = Config::from_map(&env).unwrap();
            prop_assert!(config.validate().is_ok(), "{:?}", config.validate().err());
        }

        #[test]
        fn year_parsing_never_panics(min in ".*", max in ".*", output in ".*") {
            let mut env: HashMap<&str, String> = HashMap::new();
            env.insert("PILOTCLOCK_MIN_YEAR", min);
            env.insert("PILOTCLOCK_MAX_YEAR", max);
            env.insert("PILOTCLOCK_OUTPUT", output);
            let _ = Config::from_getter(|key| env.get(key).cloned());
        }
    }
}
