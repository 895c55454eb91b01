//! Scripted reference source used by the demo and the rollout tests.
//!
//! [`FootLiftPlanner`] holds the base and three feet at a nominal stance and
//! raises one foot along `z(t) = h (1 - cos(ωt))`, with the matching
//! velocity `hω sin(ωt)` and acceleration `hω² cos(ωt)`.

use nalgebra::Vector3;
use stride_core::N_FEET;
use stride_ik::{BaseReference, Foot, ReferenceProvider, References};

/// Lift height used by the hind-left demo.
pub const DEMO_LIFT_HEIGHT: f64 = 0.1;

/// Lift angular rate used by the hind-left demo (rad/s).
pub const DEMO_LIFT_RATE: f64 = 10.0;

/// Moves one foot up and down above a fixed stance.
#[derive(Clone, Debug, PartialEq)]
pub struct FootLiftPlanner {
    stance: References,
    foot: Foot,
    height: f64,
    rate: f64,
    t: f64,
}

impl FootLiftPlanner {
    pub fn new(stance: References, foot: Foot, height: f64, rate: f64) -> Self {
        Self {
            stance,
            foot,
            height,
            rate,
            t: 0.0,
        }
    }

    /// Hind-left foot, 0.1 m half-height, 10 rad/s.
    pub fn hind_left_demo(stance: References) -> Self {
        Self::new(stance, Foot::HindLeft, DEMO_LIFT_HEIGHT, DEMO_LIFT_RATE)
    }

    pub const fn foot(&self) -> Foot {
        self.foot
    }

    /// Move the planner to time `t` (seconds).
    pub fn set_time(&mut self, t: f64) {
        self.t = t;
    }

    /// Current height of the lifted foot above its stance position.
    pub fn lift(&self) -> f64 {
        self.height * (1.0 - (self.rate * self.t).cos())
    }

    /// Reference position of the lifted foot at the current time.
    pub fn lifted_target(&self) -> Vector3<f64> {
        self.stance.feet.positions[self.foot.index()] + Vector3::z() * self.lift()
    }

    fn lifted_only(&self, value: f64) -> [Vector3<f64>; N_FEET] {
        let mut out = [Vector3::zeros(); N_FEET];
        out[self.foot.index()].z = value;
        out
    }
}

impl ReferenceProvider for FootLiftPlanner {
    fn foot_positions(&self) -> [Vector3<f64>; N_FEET] {
        let mut positions = self.stance.feet.positions;
        positions[self.foot.index()] = self.lifted_target();
        positions
    }

    fn foot_velocities(&self) -> [Vector3<f64>; N_FEET] {
        self.lifted_only(self.height * self.rate * (self.rate * self.t).sin())
    }

    fn foot_accelerations(&self) -> [Vector3<f64>; N_FEET] {
        self.lifted_only(self.height * self.rate.powi(2) * (self.rate * self.t).cos())
    }

    fn base_reference(&self) -> BaseReference {
        self.stance.base.clone()
    }
}
