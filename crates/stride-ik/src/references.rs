//! Tracking references supplied by the trajectory planner.
//!
//! The IK reads references through the narrow [`ReferenceProvider`]
//! capability, so any planner that can answer the four accessors plugs in.
//! [`References`] is the plain-value implementation used when the caller
//! already holds the numbers.

use nalgebra::{Rotation3, Vector3};
use stride_core::N_FEET;

use crate::kinematics::FrameStates;

/// Commanded base motion.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseReference {
    pub position: Vector3<f64>,
    pub orientation: Rotation3<f64>,
    pub linear_velocity: Vector3<f64>,
    pub angular_velocity: Vector3<f64>,
    /// Feed-forward linear acceleration (zero unless the planner provides one).
    pub linear_acceleration: Vector3<f64>,
    /// Feed-forward angular acceleration (zero unless the planner provides one).
    pub angular_acceleration: Vector3<f64>,
}

impl BaseReference {
    /// Hold `position` and `orientation` with zero velocity.
    pub fn hold(position: Vector3<f64>, orientation: Rotation3<f64>) -> Self {
        Self {
            position,
            orientation,
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            linear_acceleration: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
        }
    }

    /// Build from the planner's 12-element command vector
    /// `[x, y, z, roll, pitch, yaw, vx, vy, vz, wx, wy, wz]`.
    pub fn from_pose_vector(x_cmd: &[f64; 12]) -> Self {
        Self {
            position: Vector3::new(x_cmd[0], x_cmd[1], x_cmd[2]),
            orientation: Rotation3::from_euler_angles(x_cmd[3], x_cmd[4], x_cmd[5]),
            linear_velocity: Vector3::new(x_cmd[6], x_cmd[7], x_cmd[8]),
            angular_velocity: Vector3::new(x_cmd[9], x_cmd[10], x_cmd[11]),
            linear_acceleration: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
        }
    }
}

impl Default for BaseReference {
    fn default() -> Self {
        Self::hold(Vector3::zeros(), Rotation3::identity())
    }
}

/// Position, velocity and acceleration targets for the four feet.
#[derive(Clone, Debug, PartialEq)]
pub struct FootReferences {
    pub positions: [Vector3<f64>; N_FEET],
    pub velocities: [Vector3<f64>; N_FEET],
    pub accelerations: [Vector3<f64>; N_FEET],
}

impl FootReferences {
    /// Hold every foot at `positions` with zero velocity and acceleration.
    pub fn hold(positions: [Vector3<f64>; N_FEET]) -> Self {
        Self {
            positions,
            velocities: [Vector3::zeros(); N_FEET],
            accelerations: [Vector3::zeros(); N_FEET],
        }
    }
}

/// Read access to the planner's current references.
pub trait ReferenceProvider {
    /// Desired foot positions, order FL, FR, HL, HR.
    fn foot_positions(&self) -> [Vector3<f64>; N_FEET];

    /// Desired foot velocities.
    fn foot_velocities(&self) -> [Vector3<f64>; N_FEET];

    /// Desired foot accelerations.
    fn foot_accelerations(&self) -> [Vector3<f64>; N_FEET];

    /// Desired base motion.
    fn base_reference(&self) -> BaseReference;

    /// All foot targets at once.
    fn foot_references(&self) -> FootReferences {
        FootReferences {
            positions: self.foot_positions(),
            velocities: self.foot_velocities(),
            accelerations: self.foot_accelerations(),
        }
    }
}

/// Plain-value references for one control tick.
#[derive(Clone, Debug, PartialEq)]
pub struct References {
    pub feet: FootReferences,
    pub base: BaseReference,
}

impl References {
    /// Hold every frame where it currently is, at rest.
    pub fn hold_states(states: &FrameStates) -> Self {
        Self {
            feet: FootReferences::hold(states.feet.each_ref().map(|s| s.position)),
            base: BaseReference::hold(states.base.position, states.base.rotation),
        }
    }
}

impl ReferenceProvider for References {
    fn foot_positions(&self) -> [Vector3<f64>; N_FEET] {
        self.feet.positions
    }

    fn foot_velocities(&self) -> [Vector3<f64>; N_FEET] {
        self.feet.velocities
    }

    fn foot_accelerations(&self) -> [Vector3<f64>; N_FEET] {
        self.feet.accelerations
    }

    fn base_reference(&self) -> BaseReference {
        self.base.clone()
    }

    fn foot_references(&self) -> FootReferences {
        self.feet.clone()
    }
}
