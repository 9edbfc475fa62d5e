use thiserror::Error;

/// Failures raised while evaluating the globe temperature chain or loading its inputs.
#[derive(Error, Debug)]
pub enum GlobeError {
    #[error("division by zero in {term}: {detail}")]
    DivisionByZero { term: &'static str, detail: String },
    #[error("{quantity} = {value} is negative or NaN; its fractional power has no real value")]
    UndefinedFractionalPower { quantity: &'static str, value: f64 },
    #[error("failed to read calculator config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid calculator config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type for `Result<T, GlobeError>`.
pub type GlobeResult<T> = Result<T, GlobeError>;
