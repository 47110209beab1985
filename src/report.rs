//! Rendering of solved celebrations

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

use crate::solver::{format_moscow, REPORT_ZONE};

/// Long human-readable form, e.g. `September 23, 2020 at 6:00 AM MSK`
pub const FULL_FORMAT: &str = "%B %-d, %Y at %-I:%M %p %Z";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `YYYY-MM-DD HH:mm:ss`
    #[default]
    Plain,
    Full,
    Json,
}

#[derive(Debug, Error)]
#[error("unknown output format \"{0}\"")]
pub struct UnknownFormat(String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "full" => Ok(OutputFormat::Full),
            "json" => Ok(OutputFormat::Json),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// One solved year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Celebration {
    pub year: i32,
    /// Moscow civil time, `YYYY-MM-DD HH:mm:ss`
    pub moscow_time: String,
    pub universal_time: DateTime<Utc>,
}

impl Celebration {
    pub fn new(year: i32, universal_time: DateTime<Utc>) -> Self {
        Self {
            year,
            moscow_time: format_moscow(universal_time),
            universal_time,
        }
    }

    pub fn full_moscow_time(&self) -> String {
        self.universal_time
            .with_timezone(&REPORT_ZONE)
            .format(FULL_FORMAT)
            .to_string()
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Plain => Ok(self.moscow_time.clone()),
            OutputFormat::Full => Ok(format!(
                "New year {} on the pilot's watch: {} in Moscow",
                self.year,
                self.full_moscow_time()
            )),
            OutputFormat::Json => serde_json::to_string(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn celebration_2021() -> Celebration {
        let t = NaiveDate::from_ymd_opt(2020, 9, 23)
            .unwrap()
            .and_hms_opt(3, 0, 0)
            .unwrap()
            .and_utc();
        Celebration::new(2021, t)
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert_eq!(" Json ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("FULL".parse::<OutputFormat>().unwrap(), OutputFormat::Full);
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.to_string(), "unknown output format \"yaml\"");
    }

    #[test]
    fn test_render_plain() {
        let c = celebration_2021();
        assert_eq!(c.render(OutputFormat::Plain).unwrap(), "2020-09-23 06:00:00");
    }

    #[test]
    fn test_render_full() {
        let c = celebration_2021();
        assert_eq!(c.full_moscow_time(), "September 23, 2020 at 6:00 AM MSK");
        let line = c.render(OutputFormat::Full).unwrap();
        assert!(line.starts_with("New year 2021"), "{}", line);
    }

    #[test]
    fn test_render_full_afternoon() {
        let t = NaiveDate::from_ymd_opt(2022, 11, 28)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        let c = Celebration::new(2024, t);
        assert_eq!(c.full_moscow_time(), "November 28, 2022 at 3:00 PM MSK");
    }

    #[test]
    fn test_render_json() {
        let c = celebration_2021();
        let json = c.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["year"], 2021);
        assert_eq!(value["moscow_time"], "2020-09-23 06:00:00");
        assert_eq!(value["universal_time"], "2020-09-23T03:00:00Z");
    }
}
