pub mod measurement;
pub mod report;
