//! Contact sequencing for periodic quadruped gaits.
//!
//! Provides [`ContactSchedule`], a binary `N × 4` footfall matrix sampled over
//! one gait cycle. The control loop rotates it once per schedule row so that
//! row 0 always holds the instantaneous contact state consumed by the planner
//! and the whole-body IK.

pub mod sequencer;

pub use sequencer::{ContactRow, ContactSchedule, GaitPattern};
