use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use config::{Config, Environment};
use serde::Deserialize;

use crate::parser::days::SegmentOptions;
use crate::parser::{ParseOptions, DEFAULT_YEAR};

/// Runtime settings, read from `WOD_*` environment variables over defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: PathBuf,
    pub default_year: i32,
    pub min_span_chars: usize,
    pub extract_timeout_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_config(Config::builder().add_source(Environment::with_prefix("WOD").try_parsing(true)))
    }

    fn from_config(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        builder
            .set_default("db_path", "data/workouts.sqlite")?
            .set_default("default_year", DEFAULT_YEAR as i64)?
            .set_default("min_span_chars", 0_i64)?
            .set_default("extract_timeout_secs", 30_i64)?
            .build()
            .context("loading settings")?
            .try_deserialize()
            .context("invalid WOD_* settings")
    }

    pub fn extract_timeout(&self) -> Duration {
        Duration::from_secs(self.extract_timeout_secs)
    }

    pub fn parse_options(&self, today: NaiveDate) -> ParseOptions {
        ParseOptions {
            default_year: self.default_year,
            today,
            segment: SegmentOptions {
                min_span_chars: self.min_span_chars,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::from_config(Config::builder()).unwrap();
        assert_eq!(s.db_path, PathBuf::from("data/workouts.sqlite"));
        assert_eq!(s.default_year, 2026);
        assert_eq!(s.min_span_chars, 0);
        assert_eq!(s.extract_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn overrides() {
        let builder = Config::builder()
            .set_override("default_year", 2027_i64)
            .unwrap()
            .set_override("min_span_chars", 80_i64)
            .unwrap();
        let s = Settings::from_config(builder).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let opts = s.parse_options(today);
        assert_eq!(opts.default_year, 2027);
        assert_eq!(opts.segment.min_span_chars, 80);
        assert_eq!(opts.today, today);
    }
}
