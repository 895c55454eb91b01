// stride-core: Errors, configuration, gains and control clock for the Stride controller.

pub mod config;
pub mod error;
pub mod gains;
pub mod time;

pub use config::{GainsConfig, GaitConfig, SolverConfig, StrideConfig, TimingConfig, integral_ratio};
pub use error::{CommandStage, ConfigError, ControlError, StrideError};
pub use gains::{GainSet, PdGains};
pub use time::{Cadence, ControlClock};

/// Number of feet on the robot.
pub const N_FEET: usize = 4;

/// Foot names in schedule column order.
pub const FOOT_NAMES: [&str; N_FEET] = ["FL", "FR", "HL", "HR"];
