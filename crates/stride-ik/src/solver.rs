//! Flat whole-body inverse kinematics.
//!
//! All active tasks are stacked into one system and resolved with a single
//! damped pseudo-inverse. There is no priority hierarchy: conflicting tasks
//! are traded off in the least-squares sense.

use nalgebra::DVector;
use stride_core::{CommandStage, GainSet, StrideConfig, StrideError, N_FEET};

use crate::kinematics::KinematicsEvaluator;
use crate::pinv::{damped_pseudo_inverse, DEFAULT_DAMPING};
use crate::references::ReferenceProvider;
use crate::tasks::{TaskBuilder, TaskSet};

/// Output of one IK solve.
#[derive(Clone, Debug, PartialEq)]
pub struct IkCommand {
    /// Generalized acceleration (`nv`).
    pub ddq: DVector<f64>,
    /// Generalized velocity command (`nv`).
    pub dq_cmd: DVector<f64>,
    /// Configuration command (`nq`), the measured configuration integrated
    /// by the position-error correction.
    pub q_cmd: DVector<f64>,
}

impl IkCommand {
    /// First output that contains a NaN or infinity, if any.
    pub fn first_non_finite(&self) -> Option<CommandStage> {
        let finite = |x: &DVector<f64>| x.iter().all(|v| v.is_finite());
        if !finite(&self.ddq) {
            Some(CommandStage::Acceleration)
        } else if !finite(&self.dq_cmd) {
            Some(CommandStage::Velocity)
        } else if !finite(&self.q_cmd) {
            Some(CommandStage::Configuration)
        } else {
            None
        }
    }
}

/// Task builder plus damped least-squares resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct WholeBodyIk {
    builder: TaskBuilder,
    damping: f64,
}

impl Default for WholeBodyIk {
    fn default() -> Self {
        Self::new(TaskBuilder::new(GainSet::default(), false), DEFAULT_DAMPING)
    }
}

impl WholeBodyIk {
    pub const fn new(builder: TaskBuilder, damping: f64) -> Self {
        Self { builder, damping }
    }

    /// Build from validated configuration.
    pub fn from_config(config: &StrideConfig) -> Result<Self, StrideError> {
        config.validate()?;
        let gains = config.gains.gain_set()?;
        Ok(Self::new(
            TaskBuilder::new(gains, config.solver.gate_stance_feedback),
            config.solver.damping,
        ))
    }

    pub const fn builder(&self) -> &TaskBuilder {
        &self.builder
    }

    pub const fn damping(&self) -> f64 {
        self.damping
    }

    /// Resolve an already built task set at configuration `q`.
    ///
    /// `ddq = J⁺ a`, `dq_cmd = J⁺ v*`, `q_cmd = q ⊕ J⁺ e`.
    pub fn solve<K>(&self, model: &K, q: &DVector<f64>, tasks: &TaskSet) -> IkCommand
    where
        K: KinematicsEvaluator + ?Sized,
    {
        let stacked = tasks.stack();
        let pinv = damped_pseudo_inverse(&stacked.jacobian, self.damping);

        let ddq = &pinv * &stacked.acceleration;
        let dq_cmd = &pinv * &stacked.velocity;
        let dq_err = &pinv * &stacked.position_error;

        IkCommand {
            ddq,
            dq_cmd,
            q_cmd: model.integrate(q, &dq_err),
        }
    }

    /// Rebuild the tasks at `(q, v)` and solve them.
    pub fn compute<K, R>(
        &self,
        model: &K,
        q: &DVector<f64>,
        v: &DVector<f64>,
        references: &R,
        contacts: &[bool; N_FEET],
    ) -> IkCommand
    where
        K: KinematicsEvaluator + ?Sized,
        R: ReferenceProvider + ?Sized,
    {
        let tasks = self.builder.build(model, q, v, references, contacts);
        self.solve(model, q, &tasks)
    }
}
