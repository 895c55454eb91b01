//! Free-flyer configuration layout shared by floating-base models.
//!
//! Configuration: `[px, py, pz, qx, qy, qz, qw, joints...]`.
//! Velocity: `[vx, vy, vz, wx, wy, wz, joint rates...]`, world-aligned.
//!
//! Integration moves the base position additively and rotates the base
//! orientation by the exponential of the world-frame angular displacement,
//! so the quaternion stays on the unit sphere.

use nalgebra::{DVector, Quaternion, UnitQuaternion, Vector3};

/// Configuration entries used by the floating base.
pub const BASE_NQ: usize = 7;

/// Velocity entries used by the floating base.
pub const BASE_NV: usize = 6;

/// Base position from a configuration vector.
pub fn base_position(q: &DVector<f64>) -> Vector3<f64> {
    Vector3::new(q[0], q[1], q[2])
}

/// Base orientation from a configuration vector (renormalized).
pub fn base_orientation(q: &DVector<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::from_quaternion(Quaternion::new(q[6], q[3], q[4], q[5]))
}

/// Write the base pose into a configuration vector.
pub fn set_base_pose(q: &mut DVector<f64>, position: &Vector3<f64>, orientation: &UnitQuaternion<f64>) {
    q.fixed_rows_mut::<3>(0).copy_from(position);
    let c = orientation.quaternion().coords; // (x, y, z, w)
    q.fixed_rows_mut::<4>(3).copy_from(&c);
}

/// Integrate a velocity displacement `dv` (`nq - 1` entries) from `q`.
pub fn integrate(q: &DVector<f64>, dv: &DVector<f64>) -> DVector<f64> {
    let mut out = q.clone();
    let position = base_position(q) + dv.fixed_rows::<3>(0);
    let delta = UnitQuaternion::from_scaled_axis(Vector3::new(dv[3], dv[4], dv[5]));
    let orientation = delta * base_orientation(q);
    set_base_pose(&mut out, &position, &orientation);

    let n_joints = q.len() - BASE_NQ;
    let mut joints = out.rows_mut(BASE_NQ, n_joints);
    joints += dv.rows(BASE_NV, n_joints);
    out
}
