//! Operational-space tasks built from kinematic feedback and references.
//!
//! Every solve rebuilds six 3-row tasks in a fixed order:
//! FL, FR, HL, HR foot translation, base position, base orientation.
//! Each carries its Jacobian block, the desired acceleration of the frame
//! (PD feedback + feed-forward, minus drift), the raw position error and the
//! desired velocity.

use nalgebra::{DMatrix, DVector, Vector3};
use stride_core::{GainSet, N_FEET};

use crate::kinematics::{Foot, Frame, FrameState, KinematicsEvaluator};
use crate::references::{BaseReference, ReferenceProvider};

/// Rows contributed by one task.
pub const TASK_DIM: usize = 3;

/// Number of tasks in a full set.
pub const N_TASKS: usize = N_FEET + 2;

/// What a task tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Foot(Foot),
    BasePosition,
    BaseOrientation,
}

impl TaskKind {
    /// All kinds in stacking order.
    pub const ALL: [Self; N_TASKS] = [
        Self::Foot(Foot::FrontLeft),
        Self::Foot(Foot::FrontRight),
        Self::Foot(Foot::HindLeft),
        Self::Foot(Foot::HindRight),
        Self::BasePosition,
        Self::BaseOrientation,
    ];
}

/// One 3-DOF tracking objective.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub kind: TaskKind,
    /// `3 × nv` Jacobian block.
    pub jacobian: DMatrix<f64>,
    pub desired_acceleration: Vector3<f64>,
    /// Reference minus current (position or world-frame rotation vector).
    pub position_error: Vector3<f64>,
    pub desired_velocity: Vector3<f64>,
    /// Inactive tasks are skipped when stacking.
    pub active: bool,
}

/// The vertically stacked system of all active tasks.
#[derive(Clone, Debug, PartialEq)]
pub struct StackedTasks {
    pub jacobian: DMatrix<f64>,
    pub acceleration: DVector<f64>,
    pub position_error: DVector<f64>,
    pub velocity: DVector<f64>,
}

/// Ordered tasks produced by one [`TaskBuilder::build`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSet {
    tasks: Vec<Task>,
    nv: usize,
}

impl TaskSet {
    /// Wrap tasks built elsewhere. `nv` is the Jacobian column count.
    pub fn new(tasks: Vec<Task>, nv: usize) -> Self {
        Self { tasks, nv }
    }

    /// Tasks in stacking order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by kind.
    pub fn get(&self, kind: TaskKind) -> Option<&Task> {
        self.tasks.iter().find(|t| t.kind == kind)
    }

    /// Enable or disable a task. Returns false if no such task exists.
    pub fn set_active(&mut self, kind: TaskKind, active: bool) -> bool {
        match self.tasks.iter_mut().find(|t| t.kind == kind) {
            Some(task) => {
                task.active = active;
                true
            }
            None => false,
        }
    }

    /// Number of active tasks.
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.active).count()
    }

    /// Concatenate the active tasks' blocks.
    pub fn stack(&self) -> StackedTasks {
        let rows = TASK_DIM * self.active_count();
        let mut stacked = StackedTasks {
            jacobian: DMatrix::zeros(rows, self.nv),
            acceleration: DVector::zeros(rows),
            position_error: DVector::zeros(rows),
            velocity: DVector::zeros(rows),
        };

        for (block, task) in self.tasks.iter().filter(|t| t.active).enumerate() {
            let r = TASK_DIM * block;
            stacked
                .jacobian
                .rows_mut(r, TASK_DIM)
                .copy_from(&task.jacobian);
            stacked
                .acceleration
                .fixed_rows_mut::<TASK_DIM>(r)
                .copy_from(&task.desired_acceleration);
            stacked
                .position_error
                .fixed_rows_mut::<TASK_DIM>(r)
                .copy_from(&task.position_error);
            stacked
                .velocity
                .fixed_rows_mut::<TASK_DIM>(r)
                .copy_from(&task.desired_velocity);
        }
        stacked
    }
}

/// Turns kinematic feedback and references into a [`TaskSet`].
#[derive(Clone, Debug, PartialEq)]
pub struct TaskBuilder {
    gains: GainSet,
    gate_stance_feedback: bool,
}

impl TaskBuilder {
    /// `gate_stance_feedback` zeroes the foot PD terms and position error
    /// while the foot is in stance. With it off, stance feet are tracked
    /// exactly like swing feet.
    pub const fn new(gains: GainSet, gate_stance_feedback: bool) -> Self {
        Self {
            gains,
            gate_stance_feedback,
        }
    }

    pub const fn gains(&self) -> &GainSet {
        &self.gains
    }

    pub const fn gates_stance_feedback(&self) -> bool {
        self.gate_stance_feedback
    }

    /// Build all six tasks at `(q, v)`.
    ///
    /// `contacts` is the current contact row (true = stance), order FL, FR, HL, HR.
    pub fn build<K, R>(
        &self,
        model: &K,
        q: &DVector<f64>,
        v: &DVector<f64>,
        references: &R,
        contacts: &[bool; N_FEET],
    ) -> TaskSet
    where
        K: KinematicsEvaluator + ?Sized,
        R: ReferenceProvider + ?Sized,
    {
        let states = model.evaluate(q, v);
        let feet = references.foot_references();
        let base_ref = references.base_reference();

        let mut tasks = Vec::with_capacity(N_TASKS);
        for foot in Foot::ALL {
            let i = foot.index();
            let jacobian = model.jacobian(q, Frame::Foot(foot)).rows(0, 3).into_owned();
            tasks.push(self.foot_task(
                foot,
                jacobian,
                &states.feet[i],
                &feet.positions[i],
                &feet.velocities[i],
                &feet.accelerations[i],
                contacts[i],
            ));
        }

        let base_jacobian = model.jacobian(q, Frame::Base);
        tasks.push(self.base_position_task(
            base_jacobian.rows(0, 3).into_owned(),
            &states.base,
            &base_ref,
        ));
        tasks.push(self.base_orientation_task(
            base_jacobian.rows(3, 3).into_owned(),
            &states.base,
            &base_ref,
        ));

        TaskSet::new(tasks, model.nv())
    }

    #[allow(clippy::too_many_arguments)]
    fn foot_task(
        &self,
        foot: Foot,
        jacobian: DMatrix<f64>,
        state: &FrameState,
        ref_position: &Vector3<f64>,
        ref_velocity: &Vector3<f64>,
        ref_acceleration: &Vector3<f64>,
        in_contact: bool,
    ) -> Task {
        let gains = &self.gains.swing_foot;
        let gated = self.gate_stance_feedback && in_contact;

        let (feedback, position_error) = if gated {
            (Vector3::zeros(), Vector3::zeros())
        } else {
            (
                -gains.kp() * (state.position - ref_position)
                    - gains.kd() * (state.linear_velocity - ref_velocity),
                ref_position - state.position,
            )
        };

        Task {
            kind: TaskKind::Foot(foot),
            jacobian,
            desired_acceleration: feedback + ref_acceleration - state.linear_drift(),
            position_error,
            desired_velocity: *ref_velocity,
            active: true,
        }
    }

    fn base_position_task(
        &self,
        jacobian: DMatrix<f64>,
        state: &FrameState,
        reference: &BaseReference,
    ) -> Task {
        let gains = &self.gains.base_position;
        let acceleration = -gains.kp() * (state.position - reference.position)
            + gains.kd() * (reference.linear_velocity - state.linear_velocity)
            + reference.linear_acceleration
            - state.linear_drift();

        Task {
            kind: TaskKind::BasePosition,
            jacobian,
            desired_acceleration: acceleration,
            position_error: reference.position - state.position,
            desired_velocity: reference.linear_velocity,
            active: true,
        }
    }

    fn base_orientation_task(
        &self,
        jacobian: DMatrix<f64>,
        state: &FrameState,
        reference: &BaseReference,
    ) -> Task {
        let gains = &self.gains.base_orientation;
        // log3(R_refᵀ R) is the rotation error in the reference frame; rotate it
        // to world and negate so it points from current towards reference.
        let local = (reference.orientation.inverse() * state.rotation).scaled_axis();
        let error = -(reference.orientation * local);

        let acceleration = gains.kp() * error
            + gains.kd() * (reference.angular_velocity - state.angular_velocity)
            + reference.angular_acceleration
            - state.angular_acceleration;

        Task {
            kind: TaskKind::BaseOrientation,
            jacobian,
            desired_acceleration: acceleration,
            position_error: error,
            desired_velocity: reference.angular_velocity,
            active: true,
        }
    }
}
