//! Proportional/derivative gain pairs for the operational-space tasks.
//!
//! The derivative gain is always derived from the proportional gain for
//! critical damping (`kd = 2*sqrt(kp)`) when the gains are constructed.
//! There is no setter for `kd`.

use crate::error::ConfigError;

/// A critically damped PD gain pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdGains {
    kp: f64,
    kd: f64,
}

impl PdGains {
    /// Build a critically damped pair from a proportional gain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeGain`] if `kp` is negative or not finite.
    pub fn critically_damped(task: &'static str, kp: f64) -> Result<Self, ConfigError> {
        if !kp.is_finite() || kp < 0.0 {
            return Err(ConfigError::NegativeGain { task, value: kp });
        }
        Ok(Self {
            kp,
            kd: 2.0 * kp.sqrt(),
        })
    }

    /// Proportional gain.
    pub const fn kp(&self) -> f64 {
        self.kp
    }

    /// Derivative gain.
    pub const fn kd(&self) -> f64 {
        self.kd
    }
}

/// Gains for every task family of the whole-body IK.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainSet {
    pub base_position: PdGains,
    pub base_orientation: PdGains,
    pub swing_foot: PdGains,
}

impl GainSet {
    /// Build a gain set from the three proportional gains.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeGain`] naming the first offending task.
    pub fn from_proportional(
        base_position_kp: f64,
        base_orientation_kp: f64,
        swing_foot_kp: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base_position: PdGains::critically_damped("base_position", base_position_kp)?,
            base_orientation: PdGains::critically_damped("base_orientation", base_orientation_kp)?,
            swing_foot: PdGains::critically_damped("swing_foot", swing_foot_kp)?,
        })
    }
}

impl Default for GainSet {
    fn default() -> Self {
        let pd = PdGains {
            kp: 100.0,
            kd: 20.0,
        };
        Self {
            base_position: pd,
            base_orientation: pd,
            swing_foot: pd,
        }
    }
}
