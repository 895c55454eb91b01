//! Whole-body inverse kinematics for a floating-base quadruped.
//!
//! Each control tick turns the measured state, the planner's references and
//! the current contact row into six 3-DOF tasks (four feet, base position,
//! base orientation), stacks them and resolves the stack with one damped
//! pseudo-inverse.
//!
//! # Architecture
//!
//! ```text
//! (q, v) ─┐
//! refs ───┼─► TaskBuilder ──► TaskSet ──► WholeBodyIk ──► IkCommand
//! contacts┘        ▲                          │
//!                  └── KinematicsEvaluator ◄──┘
//! ```
//!
//! Rigid-body kinematics are supplied through [`KinematicsEvaluator`]; the
//! crate itself carries no robot model.

pub mod free_flyer;
pub mod kinematics;
pub mod pinv;
pub mod references;
pub mod solver;
pub mod tasks;

#[cfg(test)]
mod testing;

pub use kinematics::{Foot, Frame, FrameState, FrameStates, KinematicsEvaluator};
pub use pinv::{damped_pseudo_inverse, DEFAULT_DAMPING};
pub use references::{BaseReference, FootReferences, ReferenceProvider, References};
pub use solver::{IkCommand, WholeBodyIk};
pub use tasks::{StackedTasks, Task, TaskBuilder, TaskKind, TaskSet};
