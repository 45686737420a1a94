use thiserror::Error;

/// Errors that can occur while validating tuning parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A percentage lies outside its allowed range
    #[error("{field} must be within {min}..={max}, got {value}")]
    PercentOutOfRange {
        field: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },

    /// A value that must be strictly positive is not
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// A tolerance is negative or not a number
    #[error("{field} must be zero or a positive finite number, got {value}")]
    InvalidTolerance { field: &'static str, value: f32 },

    /// An interval is zero
    #[error("{field} must be longer than zero")]
    ZeroInterval { field: &'static str },
}

pub fn check_percent(field: &'static str, value: u8, min: u8, max: u8) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::PercentOutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

pub fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

pub fn check_tolerance(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::InvalidTolerance { field, value });
    }
    Ok(())
}

pub fn check_interval(field: &'static str, value: std::time::Duration) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::ZeroInterval { field });
    }
    Ok(())
}
