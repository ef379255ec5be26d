use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::ProjectDirs;

use crate::domain::entities::table::NumberFormat;

pub const DB_PATH_ENV: &str = "FORECAST_INPUT_DB";
pub const DECIMAL_COMMA_ENV: &str = "FORECAST_INPUT_DECIMAL_COMMA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub decimal_comma: bool,
}

impl Settings {
    /// Defaults, then environment overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match lookup(DB_PATH_ENV).filter(|value| !value.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        let decimal_comma = lookup(DECIMAL_COMMA_ENV)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);

        Ok(Self {
            db_path,
            decimal_comma,
        })
    }

    pub fn number_format(&self) -> NumberFormat {
        if self.decimal_comma {
            NumberFormat::DecimalComma
        } else {
            NumberFormat::DecimalPoint
        }
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "forecast-input")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().join("forecast_input.sqlite"))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_lookup(|key| match key {
            DB_PATH_ENV => Some("/tmp/forecast.sqlite".to_string()),
            DECIMAL_COMMA_ENV => Some("Yes".to_string()),
            _ => None,
        })
        .expect("settings should resolve");

        assert_eq!(settings.db_path, PathBuf::from("/tmp/forecast.sqlite"));
        assert_eq!(settings.number_format(), NumberFormat::DecimalComma);
    }

    #[test]
    fn decimal_point_by_default() {
        let settings = Settings::from_lookup(|key| match key {
            DB_PATH_ENV => Some("data.sqlite".to_string()),
            _ => None,
        })
        .expect("settings should resolve");

        assert!(!settings.decimal_comma);
        assert_eq!(settings.number_format(), NumberFormat::DecimalPoint);
    }
}
