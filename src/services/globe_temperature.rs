/// ============================================================
///  Globe Temperature Engine
///
///  Evaluation chain:
///   1. Vapor pressure   – e_a from dew point, air temperature and
///                         pressure (Magnus form with enhancement factor)
///   2. Emissivity       – epsilon_a = 0.575 · e_a^(1/7)
///   3. Radiant constant – B from direct/diffuse solar load plus
///                         atmospheric longwave term
///   4. Convective const – C from wind speed (m/h) and h
///   5. Globe temperature – T_g = (B + C·T_a + 7.68e6) / (C + 2.56e5)
///
///  B and C may be supplied up front; a supplied value replaces
///  the derivation entirely.
/// ============================================================

use crate::error::{GlobeError, GlobeResult};
use crate::models::measurement::{Measurements, Overrides};
use crate::models::report::GlobeTemperatureReport;

// ─── Physical constants ──────────────────────────────────────
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8; // W/m²K⁴
const CONVECTIVE_SCALE: f64 = 5.3865e-8;
const SECONDS_PER_HOUR: f64 = 3600.0;
const WIND_EXPONENT: f64 = 0.58;
const EMISSIVITY_COEFF: f64 = 0.575;

// Globe energy balance
const GLOBE_NUMERATOR_OFFSET: f64 = 7_680_000.0;
const GLOBE_DENOMINATOR_OFFSET: f64 = 256_000.0;

// Vapor pressure
const DEW_POINT_A: f64 = 17.67;
const DEW_POINT_B: f64 = 243.5;
const SATURATION_A: f64 = 17.502;
const SATURATION_B: f64 = 240.97;
const SATURATION_E0: f64 = 6.112; // mb
const ENHANCEMENT_BASE: f64 = 1.0007;
const ENHANCEMENT_PER_MB: f64 = 0.00000346;

/// Horizon tolerance, in ULPs of the zenith angle in radians.
///
/// `cos(90°)` evaluates to ~6.1e-17 rather than 0, and the residue grows with
/// the magnitude of the angle (270°, 450°, ...). A few ULPs of the radian value
/// catch exactly z = 90° + k·180° while angles even 1e-9° off the horizon still
/// evaluate.
const HORIZON_ULPS: f64 = 4.0;

macro_rules! trace_step {
    ($($arg:tt)*) => {
        #[cfg(feature = "verbose_log")]
        log::trace!($($arg)*);
    };
}

/// Holds one immutable set of measurements and evaluates the globe
/// temperature chain over them. All operations are pure reads.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeTemperatureCalculator {
    measurements: Measurements,
    overrides: Overrides,
}

impl GlobeTemperatureCalculator {
    pub fn new(measurements: Measurements) -> Self {
        Self::with_overrides(measurements, Overrides::default())
    }

    pub fn with_overrides(measurements: Measurements, overrides: Overrides) -> Self {
        for name in measurements.fractions_out_of_range() {
            log::warn!("{} outside [0, 1]: {:?}", name, measurements);
        }
        Self { measurements, overrides }
    }

    /// Replaces the derived radiant constant with `b`.
    pub fn with_b(mut self, b: f64) -> Self {
        self.overrides.b = Some(b);
        self
    }

    /// Replaces the derived convective constant with `c`.
    pub fn with_c(mut self, c: f64) -> Self {
        self.overrides.c = Some(c);
        self
    }

    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Atmospheric vapor pressure e_a (mb).
    pub fn calculate_e_a(&self) -> GlobeResult<f64> {
        let m = &self.measurements;
        let dew_denominator = m.dew_point_c + DEW_POINT_B;
        if dew_denominator == 0.0 {
            return Err(GlobeError::DivisionByZero {
                term: "e_a",
                detail: format!(
                    "dew point {} °C cancels the {} offset",
                    m.dew_point_c, DEW_POINT_B
                ),
            });
        }
        let saturation_denominator = SATURATION_B + m.air_temp_c;
        if saturation_denominator == 0.0 {
            return Err(GlobeError::DivisionByZero {
                term: "e_a",
                detail: format!(
                    "air temperature {} °C cancels the {} offset",
                    m.air_temp_c, SATURATION_B
                ),
            });
        }

        let term1 = (DEW_POINT_A * (m.dew_point_c - m.air_temp_c) / dew_denominator).exp();
        let term2 = ENHANCEMENT_BASE + ENHANCEMENT_PER_MB * m.pressure_mb;
        let term3 = SATURATION_E0 * (SATURATION_A * m.air_temp_c / saturation_denominator).exp();
        let e_a = term1 * term2 * term3;
        trace_step!(
            "e_a = {:.6} (dew {:.6}, enhancement {:.6}, saturation {:.6})",
            e_a, term1, term2, term3
        );
        Ok(e_a)
    }

    /// Atmospheric emissivity epsilon_a = 0.575 · e_a^(1/7).
    pub fn calculate_epsilon_a(&self) -> GlobeResult<f64> {
        emissivity_from(self.calculate_e_a()?)
    }

    /// Radiant constant B, or the override when one was supplied.
    pub fn calculate_b(&self) -> GlobeResult<f64> {
        if let Some(b) = self.overrides.b {
            return Ok(b);
        }
        let cos_z = self.cos_zenith()?;
        let epsilon_a = self.calculate_epsilon_a()?;
        Ok(self.radiant_constant(cos_z, epsilon_a))
    }

    /// Convective constant C, or the override when one was supplied.
    pub fn calculate_c(&self) -> GlobeResult<f64> {
        if let Some(c) = self.overrides.c {
            return Ok(c);
        }
        let m = &self.measurements;
        let wind_m_h = m.wind_speed_m_s * SECONDS_PER_HOUR;
        if wind_m_h.is_nan() || wind_m_h < 0.0 {
            return Err(GlobeError::UndefinedFractionalPower {
                quantity: "wind speed",
                value: m.wind_speed_m_s,
            });
        }
        let c = (m.heat_transfer_coeff * wind_m_h.powf(WIND_EXPONENT)) / CONVECTIVE_SCALE;
        trace_step!("C = {:.6} (wind {:.3} m/h)", c, wind_m_h);
        Ok(c)
    }

    /// Globe temperature T_g (°C).
    pub fn calculate_globe_temperature(&self) -> GlobeResult<f64> {
        let b = self.calculate_b()?;
        let c = self.calculate_c()?;
        globe_temperature_from(b, c, self.measurements.air_temp_c)
    }

    /// Evaluates the chain with each intermediate computed once, returning all of them.
    pub fn report(&self) -> GlobeResult<GlobeTemperatureReport> {
        let (vapor_pressure_mb, emissivity, b) = match self.overrides.b {
            Some(b) => (None, None, b),
            None => {
                let cos_z = self.cos_zenith()?;
                let e_a = self.calculate_e_a()?;
                let epsilon_a = emissivity_from(e_a)?;
                (Some(e_a), Some(epsilon_a), self.radiant_constant(cos_z, epsilon_a))
            }
        };
        let c = self.calculate_c()?;
        let globe_temp_c = globe_temperature_from(b, c, self.measurements.air_temp_c)?;

        Ok(GlobeTemperatureReport {
            observed_at: None,
            vapor_pressure_mb,
            emissivity,
            radiant_constant_b: b,
            convective_constant_c: c,
            globe_temp_c,
            b_overridden: self.overrides.b.is_some(),
            c_overridden: self.overrides.c.is_some(),
        })
    }

    fn cos_zenith(&self) -> GlobeResult<f64> {
        let zenith_rad = self.measurements.zenith_deg.to_radians();
        let cos_z = zenith_rad.cos();
        if cos_z.abs() <= HORIZON_ULPS * f64::EPSILON * zenith_rad.abs().max(1.0) {
            return Err(GlobeError::DivisionByZero {
                term: "B",
                detail: format!(
                    "zenith angle {}° puts the sun on the horizon (cos z = 0)",
                    self.measurements.zenith_deg
                ),
            });
        }
        Ok(cos_z)
    }

    fn radiant_constant(&self, cos_z: f64, epsilon_a: f64) -> f64 {
        let m = &self.measurements;
        let term1 = m.direct_beam_fraction / (4.0 * cos_z * STEFAN_BOLTZMANN);
        let term2 = (1.2 * m.diffuse_fraction) / STEFAN_BOLTZMANN;
        let term3 = epsilon_a * m.air_temp_c.powi(4);
        let b = (term1 + term2) * m.solar_radiation_w_m2 + term3;
        trace_step!(
            "B = {:.6} (direct {:.6}, diffuse {:.6}, longwave {:.6})",
            b, term1, term2, term3
        );
        b
    }
}

fn emissivity_from(e_a: f64) -> GlobeResult<f64> {
    if e_a.is_nan() || e_a < 0.0 {
        return Err(GlobeError::UndefinedFractionalPower { quantity: "e_a", value: e_a });
    }
    let epsilon_a = EMISSIVITY_COEFF * e_a.powf(1.0 / 7.0);
    trace_step!("epsilon_a = {:.6}", epsilon_a);
    Ok(epsilon_a)
}

fn globe_temperature_from(b: f64, c: f64, air_temp_c: f64) -> GlobeResult<f64> {
    let bottom = c + GLOBE_DENOMINATOR_OFFSET;
    if bottom == 0.0 {
        return Err(GlobeError::DivisionByZero {
            term: "T_g",
            detail: format!("C = {} cancels the {} offset", c, GLOBE_DENOMINATOR_OFFSET),
        });
    }
    let upper = b + c * air_temp_c + GLOBE_NUMERATOR_OFFSET;
    let t_g = upper / bottom;
    log::debug!("T_g = {:.3} °C (B = {:.3}, C = {:.3}, T_a = {:.2} °C)", t_g, b, c, air_temp_c);
    Ok(t_g)
}
