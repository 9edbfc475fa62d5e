use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::GlobeResult;
use crate::models::measurement::{Measurements, Overrides};
use crate::models::report::GlobeTemperatureReport;
use crate::services::globe_temperature::GlobeTemperatureCalculator;

#[derive(Debug, Deserialize, Clone)]
pub struct CalculatorConfig {
    pub measurements: Measurements,
    #[serde(default)]
    pub overrides: Overrides,
    #[serde(default)]
    pub observed_at: Option<DateTime<Utc>>,
}

impl CalculatorConfig {
    pub fn load(path: impl AsRef<Path>) -> GlobeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> GlobeResult<Self> {
        let config = serde_json::from_str(content)?;
        Ok(config)
    }

    pub fn calculator(&self) -> GlobeTemperatureCalculator {
        GlobeTemperatureCalculator::with_overrides(self.measurements, self.overrides)
    }

    /// Evaluates the configured measurements, stamped with `observed_at`.
    pub fn report(&self) -> GlobeResult<GlobeTemperatureReport> {
        let mut report = self.calculator().report()?;
        report.observed_at = self.observed_at;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GlobeError;
    use chrono::TimeZone;

    const STATION_JSON: &str = r#"{
        "measurements": {
            "S": 800, "f_db": 0.7, "f_dif": 0.3, "T_d": 15, "T_a": 30,
            "P": 1013, "h": 0.028, "u": 1.5, "z": 30
        },
        "overrides": { "C": 150000 },
        "observed_at": "2025-07-01T12:00:00Z"
    }"#;

    #[test]
    fn test_parse_station_config() {
        let config = CalculatorConfig::from_json_str(STATION_JSON).unwrap();
        assert_eq!(config.measurements.air_temp_c, 30.0);
        assert_eq!(config.overrides.b, None);
        assert_eq!(config.overrides.c, Some(150_000.0));
        assert_eq!(config.observed_at, Some(Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_report_is_stamped() {
        let config = CalculatorConfig::from_json_str(STATION_JSON).unwrap();
        let r = config.report().unwrap();
        assert_eq!(r.observed_at, config.observed_at);
        assert!(r.c_overridden);
        assert_eq!(r.convective_constant_c, 150_000.0);
    }

    #[test]
    fn test_overrides_and_timestamp_optional() {
        let json = r#"{"measurements": {
            "solar_radiation_w_m2": 0, "direct_beam_fraction": 0, "diffuse_fraction": 0,
            "dew_point_c": 10, "air_temp_c": 20, "pressure_mb": 1000,
            "heat_transfer_coeff": 0.03, "wind_speed_m_s": 2, "zenith_deg": 45
        }}"#;
        let config = CalculatorConfig::from_json_str(json).unwrap();
        assert_eq!(config.overrides, Overrides::default());
        assert_eq!(config.observed_at, None);
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = CalculatorConfig::from_json_str(r#"{"measurements": {"S": 800}}"#).unwrap_err();
        assert!(matches!(err, GlobeError::Json(_)), "got {}", err);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("globe-config-{}.json", std::process::id()));
        std::fs::write(&path, STATION_JSON).unwrap();
        let config = CalculatorConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.measurements.zenith_deg, 30.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CalculatorConfig::load("/nonexistent/globe-config.json").unwrap_err();
        assert!(matches!(err, GlobeError::Io(_)), "got {}", err);
    }
}
