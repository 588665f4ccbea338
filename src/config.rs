use crate::error::{ConfigError, Result};

/// Settings for exporting a node chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportConfig {
    /// Largest turn, in degrees, a single Bezier segment may cover.
    pub max_segment_angle: f64,
    /// Arc parameter where the first exported arc begins.
    pub start_param: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_segment_angle: 2.0,
            start_param: 0.0,
        }
    }
}

impl ExportConfig {
    /// Sets the subdivision bound.
    #[must_use]
    pub fn with_max_segment_angle(mut self, degrees: f64) -> Self {
        self.max_segment_angle = degrees;
        self
    }

    /// Sets the start parameter of the first arc.
    #[must_use]
    pub fn with_start_param(mut self, start_param: f64) -> Self {
        self.start_param = start_param;
        self
    }

    /// Checks the settings before a traversal starts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the angle bound is not a positive
    /// finite number or the start parameter is outside `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if !self.max_segment_angle.is_finite() || self.max_segment_angle <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_segment_angle must be positive, got {}",
                self.max_segment_angle
            ))
            .into());
        }
        if !(0.0..1.0).contains(&self.start_param) {
            return Err(ConfigError::Invalid(format!(
                "start_param must lie in [0, 1), got {}",
                self.start_param
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ExportConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_threshold() {
        for angle in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let config = ExportConfig::default().with_max_segment_angle(angle);
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn rejects_bad_start_param() {
        for start in [-0.5, 1.0, f64::NAN] {
            let config = ExportConfig::default().with_start_param(start);
            assert!(config.validate().is_err());
        }
    }
}
