//! Interface to the rigid-body kinematics evaluator.
//!
//! The IK core never computes kinematics itself. It asks a
//! [`KinematicsEvaluator`] for the placement, velocity and drift acceleration
//! of five named frames and for their Jacobians at the measured
//! configuration.
//!
//! # Conventions
//!
//! All vectors are world-aligned and taken at the frame origin. Jacobians are
//! `6 × nv` with the translation block in rows 0..3 and the rotation block in
//! rows 3..6. Accelerations are *spatial* drift accelerations at zero
//! generalized acceleration; the classical acceleration of the origin is
//! `linear_acceleration + angular_velocity × linear_velocity`.

use nalgebra::{DMatrix, DVector, Rotation3, Vector3};
use stride_core::N_FEET;

/// Foot identifiers in schedule column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Foot {
    FrontLeft,
    FrontRight,
    HindLeft,
    HindRight,
}

impl Foot {
    /// All feet in column order.
    pub const ALL: [Self; N_FEET] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::HindLeft,
        Self::HindRight,
    ];

    /// Column index in contact rows and reference arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short name (`FL`, `FR`, `HL`, `HR`).
    pub const fn name(self) -> &'static str {
        stride_core::FOOT_NAMES[self as usize]
    }

    /// True for the two left feet.
    pub const fn is_left(self) -> bool {
        matches!(self, Self::FrontLeft | Self::HindLeft)
    }

    /// True for the two front feet.
    pub const fn is_front(self) -> bool {
        matches!(self, Self::FrontLeft | Self::FrontRight)
    }
}

/// A named frame the IK tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Frame {
    Foot(Foot),
    Base,
}

/// Kinematic state of one frame at the current configuration and velocity.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameState {
    pub position: Vector3<f64>,
    pub rotation: Rotation3<f64>,
    pub linear_velocity: Vector3<f64>,
    pub angular_velocity: Vector3<f64>,
    /// Spatial linear drift acceleration.
    pub linear_acceleration: Vector3<f64>,
    /// Angular drift acceleration.
    pub angular_acceleration: Vector3<f64>,
}

impl FrameState {
    /// A frame at `position` with identity orientation, at rest.
    pub fn at_rest(position: Vector3<f64>) -> Self {
        Self {
            position,
            rotation: Rotation3::identity(),
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            linear_acceleration: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
        }
    }

    /// Classical drift acceleration of the frame origin:
    /// spatial linear acceleration plus `ω × v`.
    pub fn linear_drift(&self) -> Vector3<f64> {
        self.linear_acceleration + self.angular_velocity.cross(&self.linear_velocity)
    }
}

/// States of the four feet and the base.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStates {
    pub feet: [FrameState; N_FEET],
    pub base: FrameState,
}

impl FrameStates {
    /// State of one named frame.
    pub fn get(&self, frame: Frame) -> &FrameState {
        match frame {
            Frame::Foot(foot) => &self.feet[foot.index()],
            Frame::Base => &self.base,
        }
    }
}

/// Rigid-body kinematics of a floating-base quadruped.
///
/// Implementations own the robot model. Configurations have `nq()` entries
/// and velocities `nv()` entries.
pub trait KinematicsEvaluator {
    /// Size of a configuration vector.
    fn nq(&self) -> usize;

    /// Size of a velocity vector (number of Jacobian columns).
    fn nv(&self) -> usize;

    /// Frame placements, velocities and drift accelerations at `(q, v)`.
    fn evaluate(&self, q: &DVector<f64>, v: &DVector<f64>) -> FrameStates;

    /// `6 × nv` Jacobian of `frame` at `q`.
    fn jacobian(&self, q: &DVector<f64>, frame: Frame) -> DMatrix<f64>;

    /// Configuration reached from `q` after applying the displacement `dv`
    /// (a velocity integrated over unit time).
    fn integrate(&self, q: &DVector<f64>, dv: &DVector<f64>) -> DVector<f64>;
}
