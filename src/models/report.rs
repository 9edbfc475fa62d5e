use chrono::{DateTime, Utc};
use serde::Serialize;

/// Every intermediate of one globe temperature evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobeTemperatureReport {
    /// Timestamp of the measurements, when the caller knows it
    pub observed_at: Option<DateTime<Utc>>,
    /// Atmospheric vapor pressure e_a (mb). `None` when B was overridden.
    pub vapor_pressure_mb: Option<f64>,
    /// Atmospheric emissivity epsilon_a. `None` when B was overridden.
    pub emissivity: Option<f64>,
    pub radiant_constant_b: f64,
    pub convective_constant_c: f64,
    /// Globe temperature T_g (°C)
    pub globe_temp_c: f64,
    pub b_overridden: bool,
    pub c_overridden: bool,
}
