//! Test-only floating-base model with Cartesian (prismatic) legs.
//!
//! Each foot sits at `hip + d` in the base frame where `d` is three prismatic
//! joint offsets. Simple enough to check the task builder and solver by hand.

use nalgebra::{DMatrix, DVector, Matrix3, Vector3};
use stride_core::N_FEET;

use crate::free_flyer::{self, BASE_NQ, BASE_NV};
use crate::kinematics::{Frame, FrameState, FrameStates, KinematicsEvaluator};

pub struct CartesianLegModel {
    pub hips: [Vector3<f64>; N_FEET],
}

impl Default for CartesianLegModel {
    fn default() -> Self {
        Self {
            hips: [
                Vector3::new(0.2, 0.15, 0.0),
                Vector3::new(0.2, -0.15, 0.0),
                Vector3::new(-0.2, 0.15, 0.0),
                Vector3::new(-0.2, -0.15, 0.0),
            ],
        }
    }
}

impl CartesianLegModel {
    /// Base at `(0, 0, 0.25)`, level, feet 0.25 m below their hips.
    pub fn neutral(&self) -> DVector<f64> {
        let mut q = DVector::zeros(self.nq());
        q[2] = 0.25;
        q[6] = 1.0;
        for foot in 0..N_FEET {
            q[BASE_NQ + 3 * foot + 2] = -0.25;
        }
        q
    }

    fn leg_offset(q: &DVector<f64>, foot: usize) -> Vector3<f64> {
        q.fixed_rows::<3>(BASE_NQ + 3 * foot).into()
    }
}

impl KinematicsEvaluator for CartesianLegModel {
    fn nq(&self) -> usize {
        BASE_NQ + 3 * N_FEET
    }

    fn nv(&self) -> usize {
        BASE_NV + 3 * N_FEET
    }

    fn evaluate(&self, q: &DVector<f64>, v: &DVector<f64>) -> FrameStates {
        let rot = free_flyer::base_orientation(q).to_rotation_matrix();
        let p = free_flyer::base_position(q);
        let p_dot: Vector3<f64> = v.fixed_rows::<3>(0).into();
        let omega: Vector3<f64> = v.fixed_rows::<3>(3).into();

        let feet = std::array::from_fn(|foot| {
            let r = rot * (self.hips[foot] + Self::leg_offset(q, foot));
            let u = rot * Vector3::from(v.fixed_rows::<3>(BASE_NV + 3 * foot));
            let velocity = p_dot + omega.cross(&r) + u;
            let classical = omega.cross(&omega.cross(&r)) + 2.0 * omega.cross(&u);
            FrameState {
                position: p + r,
                rotation: rot,
                linear_velocity: velocity,
                angular_velocity: omega,
                linear_acceleration: classical - omega.cross(&velocity),
                angular_acceleration: Vector3::zeros(),
            }
        });

        let base = FrameState {
            position: p,
            rotation: rot,
            linear_velocity: p_dot,
            angular_velocity: omega,
            linear_acceleration: -omega.cross(&p_dot),
            angular_acceleration: Vector3::zeros(),
        };

        FrameStates { feet, base }
    }

    fn jacobian(&self, q: &DVector<f64>, frame: Frame) -> DMatrix<f64> {
        let mut j = DMatrix::zeros(6, self.nv());
        j.fixed_view_mut::<3, 3>(0, 0).copy_from(&Matrix3::identity());
        j.fixed_view_mut::<3, 3>(3, 3).copy_from(&Matrix3::identity());
        if let Frame::Foot(foot) = frame {
            let i = foot.index();
            let rot = free_flyer::base_orientation(q).to_rotation_matrix();
            let r = rot * (self.hips[i] + Self::leg_offset(q, i));
            j.fixed_view_mut::<3, 3>(0, 3).copy_from(&(-r.cross_matrix()));
            j.fixed_view_mut::<3, 3>(0, BASE_NV + 3 * i).copy_from(rot.matrix());
        }
        j
    }

    fn integrate(&self, q: &DVector<f64>, dv: &DVector<f64>) -> DVector<f64> {
        free_flyer::integrate(q, dv)
    }
}
