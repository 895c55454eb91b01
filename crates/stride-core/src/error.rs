use thiserror::Error;

/// Top-level error type for the Stride crates.
#[derive(Debug, Error)]
pub enum StrideError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Control error: {0}")]
    Control(#[from] ControlError),
}

/// Configuration errors, raised once at setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid gait period: {0} (must be finite and > 0)")]
    InvalidPeriod(f64),

    #[error("Invalid gait step: {0} (must be finite and > 0)")]
    InvalidStep(f64),

    #[error("Gait step {step} does not evenly divide period {period}")]
    StepDoesNotDividePeriod { period: f64, step: f64 },

    #[error("Invalid control_dt: {0} (must be finite and > 0)")]
    InvalidControlDt(f64),

    #[error("control_dt {control_dt} does not evenly divide gait step {step}")]
    ControlDtDoesNotDivideStep { control_dt: f64, step: f64 },

    #[error("Phase offset for foot {foot} out of range: {value} (must be in [0, 1))")]
    PhaseOffsetOutOfRange { foot: usize, value: f64 },

    #[error("Negative gain for {task}: {value}")]
    NegativeGain { task: &'static str, value: f64 },

    #[error("Invalid damping: {0} (must be finite and >= 0)")]
    InvalidDamping(f64),
}

/// Errors raised by the control loop around the solver.
///
/// Copy + static messages for cheap propagation in the control tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("Non-finite {stage} command")]
    NonFiniteCommand { stage: CommandStage },

    #[error("State dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Which part of a solver command failed the finiteness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStage {
    Acceleration,
    Velocity,
    Configuration,
}

impl std::fmt::Display for CommandStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Acceleration => "acceleration",
            Self::Velocity => "velocity",
            Self::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_error_from_config_error() {
        let err = ConfigError::InvalidPeriod(-1.0);
        let stride_err: StrideError = err.into();
        assert!(matches!(stride_err, StrideError::Config(_)));
        assert!(stride_err.to_string().contains("-1"));
    }

    #[test]
    fn stride_error_from_control_error() {
        let err = ControlError::NonFiniteCommand {
            stage: CommandStage::Acceleration,
        };
        let stride_err: StrideError = err.into();
        assert!(matches!(stride_err, StrideError::Control(_)));
        assert!(stride_err.to_string().contains("acceleration"));
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::Io(_)));
    }

    #[test]
    fn control_error_is_copy() {
        let err = ControlError::DimensionMismatch {
            expected: 19,
            got: 12,
        };
        let err2 = err;
        assert_eq!(err, err2);
    }

    #[test]
    fn config_error_display_messages() {
        assert_eq!(
            ConfigError::StepDoesNotDividePeriod {
                period: 0.6,
                step: 0.25
            }
            .to_string(),
            "Gait step 0.25 does not evenly divide period 0.6"
        );
        assert_eq!(
            ConfigError::PhaseOffsetOutOfRange {
                foot: 2,
                value: 1.0
            }
            .to_string(),
            "Phase offset for foot 2 out of range: 1 (must be in [0, 1))"
        );
        assert_eq!(
            ConfigError::NegativeGain {
                task: "swing_foot",
                value: -3.0
            }
            .to_string(),
            "Negative gain for swing_foot: -3"
        );
        assert_eq!(
            ConfigError::InvalidDamping(f64::NAN).to_string(),
            "Invalid damping: NaN (must be finite and >= 0)"
        );
    }

    #[test]
    fn control_error_display_messages() {
        assert_eq!(
            ControlError::NonFiniteCommand {
                stage: CommandStage::Configuration
            }
            .to_string(),
            "Non-finite configuration command"
        );
        assert_eq!(
            ControlError::DimensionMismatch {
                expected: 18,
                got: 17
            }
            .to_string(),
            "State dimension mismatch: expected 18, got 17"
        );
    }
}
