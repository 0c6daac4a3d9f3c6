use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid {name}: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: String,
    },
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not render plot: {0}")]
    Render(String),
    #[error("{0}")]
    Usage(String),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub fn invalid(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Fails unless `value` is finite and inside `[min, max]`.
pub fn ensure_in_range(name: &'static str, value: f64, min: f64, max: f64) -> SimResult<f64> {
    if !value.is_finite() {
        return Err(SimError::invalid(name, value, "must be a finite number"));
    }
    if value < min || value > max {
        return Err(SimError::invalid(
            name,
            value,
            format!("expected a value in [{min}, {max}]"),
        ));
    }
    Ok(value)
}

/// Fails unless `value` is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> SimResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SimError::invalid(name, value, "must be a positive number"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{SimError, ensure_in_range, ensure_positive};

    #[test]
    fn range_check_accepts_bounds() {
        assert_eq!(ensure_in_range("angle", 0.0, 0.0, 90.0).unwrap(), 0.0);
        assert_eq!(ensure_in_range("angle", 90.0, 0.0, 90.0).unwrap(), 90.0);
    }

    #[test]
    fn range_check_rejects_nan_and_outliers() {
        let err = ensure_in_range("angle", f64::NAN, 0.0, 90.0).expect_err("NaN must fail");
        assert!(err.is_invalid_parameter());

        let err = ensure_in_range("angle", 91.0, 0.0, 90.0).expect_err("91 must fail");
        assert!(err.to_string().contains("Invalid angle"));
    }

    #[test]
    fn positive_check_rejects_zero() {
        assert!(matches!(
            ensure_positive("dt", 0.0),
            Err(SimError::InvalidParameter { name: "dt", .. })
        ));
        assert!(ensure_positive("dt", 0.05).is_ok());
    }
}
