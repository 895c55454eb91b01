//! Floating-base quadruped kinematics.
//!
//! [`QuadrupedModel`] combines a free-flyer base with four [`LegChain`]s and
//! implements [`KinematicsEvaluator`]. Velocities and drift accelerations
//! are propagated outward along each leg in the world frame:
//!
//! ```text
//! ω_k = ω_{k-1} + z_k q̇_k
//! α_k = α_{k-1} + ω_{k-1} × z_k q̇_k
//! v(o_{k+1}) = v(o_k) + ω_k × d
//! a(o_{k+1}) = a(o_k) + α_k × d + ω_k × (ω_k × d)
//! ```
//!
//! with `d = o_{k+1} - o_k`. The base is unaccelerated at zero generalized
//! acceleration, since the world-aligned base velocity is integrated as is.

use nalgebra::{DMatrix, DVector, Matrix3, UnitQuaternion, Vector3};
use stride_core::N_FEET;
use stride_ik::free_flyer::{self, BASE_NQ, BASE_NV};
use stride_ik::{Foot, Frame, FrameState, FrameStates, KinematicsEvaluator};

use crate::leg::{LegChain, LegFrames, LegJoint, LEG_DOF};

/// Hip abduction/adduction, hip flexion/extension, knee flexion/extension.
pub const SOLO12_NEUTRAL_LEG: [f64; LEG_DOF] = [0.0, 0.8, -1.6];

const SOLO12_HIP_X: f64 = 0.1946;
const SOLO12_HIP_Y: f64 = 0.0875;
const SOLO12_HFE_Y: f64 = 0.014;
const SOLO12_KFE_Y: f64 = 0.037_45;
const SOLO12_FOOT_Y: f64 = 0.029_96;
const SOLO12_THIGH: f64 = 0.16;
const SOLO12_SHANK: f64 = 0.16;

/// Four-legged robot with a free-flyer base.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadrupedModel {
    name: &'static str,
    legs: [LegChain; N_FEET],
    neutral_leg: [f64; LEG_DOF],
}

impl QuadrupedModel {
    pub fn new(name: &'static str, legs: [LegChain; N_FEET], neutral_leg: [f64; LEG_DOF]) -> Self {
        Self {
            name,
            legs,
            neutral_leg,
        }
    }

    /// Solo12 geometry: 0.16 m thigh and shank, hips at `(±0.1946, ±0.0875, 0)`.
    pub fn solo12() -> Self {
        let legs = Foot::ALL.map(|foot| {
            let x = if foot.is_front() { SOLO12_HIP_X } else { -SOLO12_HIP_X };
            let side = if foot.is_left() { 1.0 } else { -1.0 };
            LegChain::new(
                [
                    LegJoint::new(
                        "HAA",
                        Vector3::new(x, side * SOLO12_HIP_Y, 0.0),
                        Vector3::x_axis(),
                    ),
                    LegJoint::new(
                        "HFE",
                        Vector3::new(0.0, side * SOLO12_HFE_Y, 0.0),
                        Vector3::y_axis(),
                    ),
                    LegJoint::new(
                        "KFE",
                        Vector3::new(0.0, side * SOLO12_KFE_Y, -SOLO12_THIGH),
                        Vector3::y_axis(),
                    ),
                ],
                Vector3::new(0.0, side * SOLO12_FOOT_Y, -SOLO12_SHANK),
            )
        });
        Self::new("solo12", legs, SOLO12_NEUTRAL_LEG)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn leg(&self, foot: Foot) -> &LegChain {
        &self.legs[foot.index()]
    }

    /// Level base at the origin in x/y, every leg at the neutral joint angles,
    /// and the base high enough for the lowest foot to touch `z = 0`.
    pub fn neutral_configuration(&self) -> DVector<f64> {
        let mut q = DVector::zeros(self.nq());
        let lowest = self
            .legs
            .iter()
            .map(|leg| leg.foot_position(&self.neutral_leg).z)
            .fold(f64::INFINITY, f64::min);
        free_flyer::set_base_pose(
            &mut q,
            &Vector3::new(0.0, 0.0, -lowest),
            &UnitQuaternion::identity(),
        );
        for foot in Foot::ALL {
            q.fixed_rows_mut::<LEG_DOF>(joint_offset(foot))
                .copy_from_slice(&self.neutral_leg);
        }
        q
    }

    /// Joint angles of one leg.
    pub fn leg_angles(q: &DVector<f64>, foot: Foot) -> [f64; LEG_DOF] {
        let start = joint_offset(foot);
        std::array::from_fn(|k| q[start + k])
    }

    fn leg_frames(&self, q: &DVector<f64>, foot: Foot) -> LegFrames {
        self.legs[foot.index()].frames(&Self::leg_angles(q, foot))
    }

    fn foot_state(
        &self,
        q: &DVector<f64>,
        v: &DVector<f64>,
        foot: Foot,
        base: &FrameState,
        orientation: &UnitQuaternion<f64>,
    ) -> FrameState {
        let frames = self.leg_frames(q, foot);
        let rates = v.fixed_rows::<LEG_DOF>(BASE_NV + LEG_DOF * foot.index());
        let p = base.position;
        let to_world = |x: &Vector3<f64>| p + orientation * x;

        let mut point = to_world(&frames.origins[0]);
        let r = point - p;
        let mut velocity = base.linear_velocity + base.angular_velocity.cross(&r);
        let mut acceleration = base.angular_velocity.cross(&base.angular_velocity.cross(&r));
        let mut omega = base.angular_velocity;
        let mut alpha = Vector3::zeros();

        for k in 0..LEG_DOF {
            let spin = (orientation * frames.axes[k]) * rates[k];
            alpha += omega.cross(&spin);
            omega += spin;

            let next = if k + 1 < LEG_DOF {
                to_world(&frames.origins[k + 1])
            } else {
                to_world(&frames.foot)
            };
            let d = next - point;
            velocity += omega.cross(&d);
            acceleration += alpha.cross(&d) + omega.cross(&omega.cross(&d));
            point = next;
        }

        FrameState {
            position: point,
            rotation: (orientation * frames.foot_rotation).to_rotation_matrix(),
            linear_velocity: velocity,
            angular_velocity: omega,
            linear_acceleration: acceleration - omega.cross(&velocity),
            angular_acceleration: alpha,
        }
    }
}

/// Index of a leg's first joint in the configuration vector.
const fn joint_offset(foot: Foot) -> usize {
    BASE_NQ + LEG_DOF * foot.index()
}

impl KinematicsEvaluator for QuadrupedModel {
    fn nq(&self) -> usize {
        BASE_NQ + LEG_DOF * N_FEET
    }

    fn nv(&self) -> usize {
        BASE_NV + LEG_DOF * N_FEET
    }

    fn evaluate(&self, q: &DVector<f64>, v: &DVector<f64>) -> FrameStates {
        let orientation = free_flyer::base_orientation(q);
        let linear_velocity: Vector3<f64> = v.fixed_rows::<3>(0).into();
        let angular_velocity: Vector3<f64> = v.fixed_rows::<3>(3).into();

        let base = FrameState {
            position: free_flyer::base_position(q),
            rotation: orientation.to_rotation_matrix(),
            linear_velocity,
            angular_velocity,
            linear_acceleration: -angular_velocity.cross(&linear_velocity),
            angular_acceleration: Vector3::zeros(),
        };
        let feet = Foot::ALL.map(|foot| self.foot_state(q, v, foot, &base, &orientation));

        FrameStates { feet, base }
    }

    fn jacobian(&self, q: &DVector<f64>, frame: Frame) -> DMatrix<f64> {
        let mut j = DMatrix::zeros(6, self.nv());
        j.fixed_view_mut::<3, 3>(0, 0).copy_from(&Matrix3::identity());
        j.fixed_view_mut::<3, 3>(3, 3).copy_from(&Matrix3::identity());

        if let Frame::Foot(foot) = frame {
            let orientation = free_flyer::base_orientation(q);
            let frames = self.leg_frames(q, foot);
            let foot_world = orientation * frames.foot;
            j.fixed_view_mut::<3, 3>(0, 3)
                .copy_from(&(-foot_world.cross_matrix()));

            for k in 0..LEG_DOF {
                let axis = orientation * frames.axes[k];
                let lever = foot_world - orientation * frames.origins[k];
                let col = BASE_NV + LEG_DOF * foot.index() + k;
                j.fixed_view_mut::<3, 1>(0, col).copy_from(&axis.cross(&lever));
                j.fixed_view_mut::<3, 1>(3, col).copy_from(&axis);
            }
        }
        j
    }

    fn integrate(&self, q: &DVector<f64>, dv: &DVector<f64>) -> DVector<f64> {
        free_flyer::integrate(q, dv)
    }
}
