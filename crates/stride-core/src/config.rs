use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gains::GainSet;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_control_dt() -> f64 {
    0.001
}
const fn default_gait_period() -> f64 {
    0.6
}
const fn default_gait_step() -> f64 {
    0.02
}
const fn default_phase_offsets() -> [f64; 4] {
    [0.0, 0.5, 0.5, 0.0]
}
const fn default_kp() -> f64 {
    100.0
}
const fn default_damping() -> f64 {
    1e-2
}

/// Relative tolerance used when checking that one period divides another.
pub const RATIO_TOLERANCE: f64 = 1e-6;

/// Number of times `step` fits in `period`, if it fits a whole number of times.
///
/// Returns `None` when the ratio is not integral within [`RATIO_TOLERANCE`]
/// or would be zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn integral_ratio(period: f64, step: f64) -> Option<usize> {
    let ratio = period / step;
    if !ratio.is_finite() {
        return None;
    }
    let n = ratio.round();
    if n < 1.0 || (ratio - n).abs() > RATIO_TOLERANCE * n {
        return None;
    }
    Some(n as usize)
}

// ---------------------------------------------------------------------------
// TimingConfig
// ---------------------------------------------------------------------------

/// Control-loop timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Whole-body IK period in seconds (default: 0.001 = 1 kHz).
    #[serde(default = "default_control_dt")]
    pub control_dt: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            control_dt: default_control_dt(),
        }
    }
}

// ---------------------------------------------------------------------------
// GaitConfig
// ---------------------------------------------------------------------------

/// Periodic contact pattern parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitConfig {
    /// Gait cycle duration in seconds.
    #[serde(default = "default_gait_period")]
    pub period: f64,
    /// Duration of one schedule row in seconds. Must divide `period`.
    #[serde(default = "default_gait_step")]
    pub step: f64,
    /// Phase offset of each foot as a fraction of the period, order FL, FR, HL, HR.
    #[serde(default = "default_phase_offsets")]
    pub phase_offsets: [f64; 4],
    /// Force every entry of the schedule to stance (standing in place).
    #[serde(default)]
    pub full_stance: bool,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            period: default_gait_period(),
            step: default_gait_step(),
            phase_offsets: default_phase_offsets(),
            full_stance: false,
        }
    }
}

impl GaitConfig {
    /// Validate timing and phase offsets. Returns the number of schedule rows.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<usize, ConfigError> {
        if !self.period.is_finite() || self.period <= 0.0 {
            return Err(ConfigError::InvalidPeriod(self.period));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ConfigError::InvalidStep(self.step));
        }
        let rows = integral_ratio(self.period, self.step).ok_or(
            ConfigError::StepDoesNotDividePeriod {
                period: self.period,
                step: self.step,
            },
        )?;
        for (foot, &value) in self.phase_offsets.iter().enumerate() {
            if !(0.0..1.0).contains(&value) {
                return Err(ConfigError::PhaseOffsetOutOfRange { foot, value });
            }
        }
        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// GainsConfig
// ---------------------------------------------------------------------------

/// Proportional gains per task family. Derivative gains are derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainsConfig {
    #[serde(default = "default_kp")]
    pub base_position_kp: f64,
    #[serde(default = "default_kp")]
    pub base_orientation_kp: f64,
    #[serde(default = "default_kp")]
    pub swing_foot_kp: f64,
}

impl Default for GainsConfig {
    fn default() -> Self {
        Self {
            base_position_kp: default_kp(),
            base_orientation_kp: default_kp(),
            swing_foot_kp: default_kp(),
        }
    }
}

impl GainsConfig {
    /// Build the critically damped [`GainSet`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeGain`] if any gain is negative.
    pub fn gain_set(&self) -> Result<GainSet, ConfigError> {
        GainSet::from_proportional(
            self.base_position_kp,
            self.base_orientation_kp,
            self.swing_foot_kp,
        )
    }
}

// ---------------------------------------------------------------------------
// SolverConfig
// ---------------------------------------------------------------------------

/// Whole-body IK solver options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Tikhonov damping of the pseudo-inverse. Zero selects the exact inverse.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Zero the foot feedback terms while the foot is in stance.
    ///
    /// Off by default: stance feet keep full swing-tracking feedback.
    #[serde(default)]
    pub gate_stance_feedback: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            gate_stance_feedback: false,
        }
    }
}

// ---------------------------------------------------------------------------
// StrideConfig
// ---------------------------------------------------------------------------

/// Complete controller configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrideConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub gait: GaitConfig,
    #[serde(default)]
    pub gains: GainsConfig,
    #[serde(default)]
    pub solver: SolverConfig,
}

impl StrideConfig {
    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking timing, gait,
    /// rotation cadence, gains and damping in that order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dt = self.timing.control_dt;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ConfigError::InvalidControlDt(dt));
        }
        self.gait.validate()?;
        self.ticks_per_row()?;
        self.gains.gain_set()?;
        let damping = self.solver.damping;
        if !damping.is_finite() || damping < 0.0 {
            return Err(ConfigError::InvalidDamping(damping));
        }
        Ok(())
    }

    /// Number of control ticks per schedule row (the rotation cadence `K`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ControlDtDoesNotDivideStep`] if the gait step is
    /// not a whole multiple of the control period.
    pub fn ticks_per_row(&self) -> Result<usize, ConfigError> {
        integral_ratio(self.gait.step, self.timing.control_dt).ok_or(
            ConfigError::ControlDtDoesNotDivideStep {
                control_dt: self.timing.control_dt,
                step: self.gait.step,
            },
        )
    }

    /// Parse and validate from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed input, or the
    /// [`validate`](Self::validate) error.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "loaded controller configuration");
        Ok(config)
    }
}
