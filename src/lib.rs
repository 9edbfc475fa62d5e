//! Globe temperature (T_g) from air temperature, solar load, humidity-derived
//! emissivity and convective cooling by wind.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::CalculatorConfig;
pub use error::{GlobeError, GlobeResult};
pub use models::measurement::{Measurements, Overrides};
pub use models::report::GlobeTemperatureReport;
pub use services::globe_temperature::{GlobeTemperatureCalculator, STEFAN_BOLTZMANN};
