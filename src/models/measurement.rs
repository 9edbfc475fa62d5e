use serde::{Deserialize, Serialize};

// ─── Physical inputs ─────────────────────────────────────────────────────────

/// One set of field measurements feeding the globe temperature formula.
///
/// Every field also deserializes from the symbol used in the original
/// formulation (`S`, `f_db`, `T_a`, ...), so station exports can be loaded as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// Solar radiation received by the sensor (W/m²)
    #[serde(alias = "S")]
    pub solar_radiation_w_m2: f64,
    /// Direct-beam solar fraction [0..1]
    #[serde(alias = "f_db")]
    pub direct_beam_fraction: f64,
    /// Diffuse solar fraction [0..1]
    #[serde(alias = "f_dif")]
    pub diffuse_fraction: f64,
    /// Dew point temperature (°C)
    #[serde(alias = "T_d")]
    pub dew_point_c: f64,
    /// Air temperature (°C)
    #[serde(alias = "T_a")]
    pub air_temp_c: f64,
    /// Atmospheric pressure (mb)
    #[serde(alias = "P")]
    pub pressure_mb: f64,
    /// Convective heat transfer coefficient (W/m²·K)
    #[serde(alias = "h")]
    pub heat_transfer_coeff: f64,
    /// Wind speed (m/s)
    #[serde(alias = "u")]
    pub wind_speed_m_s: f64,
    /// Solar zenith angle (deg)
    #[serde(alias = "z")]
    pub zenith_deg: f64,
}

impl Measurements {
    /// Names of the solar fractions that fall outside [0, 1].
    pub fn fractions_out_of_range(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if !(0.0..=1.0).contains(&self.direct_beam_fraction) {
            out.push("direct_beam_fraction");
        }
        if !(0.0..=1.0).contains(&self.diffuse_fraction) {
            out.push("diffuse_fraction");
        }
        out
    }
}

// ─── Precomputed constants ───────────────────────────────────────────────────

/// Precomputed radiant (`b`) and convective (`c`) constants.
/// A present value is returned verbatim instead of being derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Overrides {
    #[serde(default, alias = "B")]
    pub b: Option<f64>,
    #[serde(default, alias = "C")]
    pub c: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Measurements {
        Measurements {
            solar_radiation_w_m2: 800.0,
            direct_beam_fraction: 0.7,
            diffuse_fraction: 0.3,
            dew_point_c: 15.0,
            air_temp_c: 30.0,
            pressure_mb: 1013.0,
            heat_transfer_coeff: 0.028,
            wind_speed_m_s: 1.5,
            zenith_deg: 30.0,
        }
    }

    #[test]
    fn test_fractions_in_range() {
        assert!(sample().fractions_out_of_range().is_empty());
    }

    #[test]
    fn test_fractions_out_of_range() {
        let m = Measurements { direct_beam_fraction: 1.2, diffuse_fraction: -0.1, ..sample() };
        assert_eq!(m.fractions_out_of_range(), vec!["direct_beam_fraction", "diffuse_fraction"]);
    }

    #[test]
    fn test_symbol_aliases() {
        let json = r#"{"S": 800, "f_db": 0.7, "f_dif": 0.3, "T_d": 15, "T_a": 30,
                       "P": 1013, "h": 0.028, "u": 1.5, "z": 30}"#;
        let m: Measurements = serde_json::from_str(json).unwrap();
        assert_eq!(m, sample());
    }

    #[test]
    fn test_overrides_default_empty() {
        let o: Overrides = serde_json::from_str("{}").unwrap();
        assert_eq!(o, Overrides::default());
        let o: Overrides = serde_json::from_str(r#"{"B": 600.0}"#).unwrap();
        assert_eq!(o.b, Some(600.0));
        assert_eq!(o.c, None);
    }
}
