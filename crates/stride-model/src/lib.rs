//! Reference kinematic model for Stride.
//!
//! Provides [`QuadrupedModel`], a free-flyer base with four three-joint legs,
//! and [`QuadrupedModel::solo12`] with Solo12 geometry. The model implements
//! [`stride_ik::KinematicsEvaluator`] so it plugs straight into the
//! whole-body IK.

pub mod leg;
pub mod quadruped;

pub use leg::{LegChain, LegFrames, LegJoint, LEG_DOF};
pub use quadruped::{QuadrupedModel, SOLO12_NEUTRAL_LEG};
