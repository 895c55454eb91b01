//! Kinematic control loop for Stride.
//!
//! Ties the contact schedule, the whole-body IK and a kinematics model into
//! a fixed-rate loop.
//!
//! # Architecture
//!
//! ```text
//! ReferenceProvider ──► ControlLoop::step ──► TickReport
//!                           │    ▲
//!          ContactSchedule ─┘    └─ q, v (integrated every tick)
//! ```

pub mod driver;
pub mod planner;
pub mod stats;

pub use driver::{ControlLoop, TickReport};
pub use planner::{FootLiftPlanner, DEMO_LIFT_HEIGHT, DEMO_LIFT_RATE};
pub use stats::TrackingStats;
