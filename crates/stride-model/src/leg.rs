//! Serial revolute leg chain expressed in the base frame.
//!
//! A [`LegChain`] is an ordered list of three revolute joints from the hip
//! to the knee plus a fixed offset to the foot. Joint origins are pure
//! translations in the parent link frame; the zero configuration has every
//! link frame aligned with the base.

use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};

/// Joints per leg (HAA, HFE, KFE).
pub const LEG_DOF: usize = 3;

/// One revolute joint of a leg.
#[derive(Clone, Debug, PartialEq)]
pub struct LegJoint {
    pub name: &'static str,
    /// Offset from the parent joint (or the base origin for the hip).
    pub origin: Vector3<f64>,
    /// Rotation axis in the joint's local frame.
    pub axis: Unit<Vector3<f64>>,
}

impl LegJoint {
    pub fn new(name: &'static str, origin: Vector3<f64>, axis: Unit<Vector3<f64>>) -> Self {
        Self { name, origin, axis }
    }
}

/// Joint origins, axes and the foot placement, all in the base frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LegFrames {
    pub origins: [Vector3<f64>; LEG_DOF],
    pub axes: [Vector3<f64>; LEG_DOF],
    pub foot: Vector3<f64>,
    /// Orientation of the last link relative to the base.
    pub foot_rotation: UnitQuaternion<f64>,
}

/// Hip-to-foot kinematic chain of one leg.
#[derive(Clone, Debug, PartialEq)]
pub struct LegChain {
    joints: [LegJoint; LEG_DOF],
    foot_offset: Vector3<f64>,
}

impl LegChain {
    pub fn new(joints: [LegJoint; LEG_DOF], foot_offset: Vector3<f64>) -> Self {
        Self {
            joints,
            foot_offset,
        }
    }

    pub fn joints(&self) -> &[LegJoint; LEG_DOF] {
        &self.joints
    }

    /// Offset from the last joint to the foot.
    pub fn foot_offset(&self) -> &Vector3<f64> {
        &self.foot_offset
    }

    /// Foot position in the base frame.
    pub fn foot_position(&self, angles: &[f64; LEG_DOF]) -> Vector3<f64> {
        self.frames(angles).foot
    }

    /// Per-joint origins and axes plus the foot placement, in the base frame.
    ///
    /// Origins and axes are recorded before applying each joint's rotation,
    /// which is where the axis is fixed in the parent link.
    pub fn frames(&self, angles: &[f64; LEG_DOF]) -> LegFrames {
        let mut transform = Isometry3::identity();
        let mut origins = [Vector3::zeros(); LEG_DOF];
        let mut axes = [Vector3::zeros(); LEG_DOF];

        for (k, (joint, &angle)) in self.joints.iter().zip(angles).enumerate() {
            transform *= Translation3::from(joint.origin);
            origins[k] = transform.translation.vector;
            axes[k] = transform.rotation * joint.axis.into_inner();
            transform *= UnitQuaternion::from_axis_angle(&joint.axis, angle);
        }

        LegFrames {
            origins,
            axes,
            foot: transform.transform_point(&Point3::from(self.foot_offset)).coords,
            foot_rotation: transform.rotation,
        }
    }
}
