pub mod globe_temperature;
