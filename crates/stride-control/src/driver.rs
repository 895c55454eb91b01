//! Fixed-rate control loop around the whole-body IK.
//!
//! [`ControlLoop`] owns the measured state, the contact schedule and the
//! control clock. Each [`ControlLoop::step`]:
//!
//! 1. rotates the schedule when a new schedule row is due (every `K` ticks,
//!    never on tick 0),
//! 2. solves the IK with the current contact row,
//! 3. rejects the command if any output is non-finite,
//! 4. integrates `v += dt * ddq` and `q = q ⊕ dt * v`.

use nalgebra::DVector;
use stride_core::{Cadence, ControlClock, ControlError, StrideConfig, StrideError};
use stride_gait::{ContactRow, ContactSchedule};
use stride_ik::{IkCommand, KinematicsEvaluator, ReferenceProvider, WholeBodyIk};
use tracing::{debug, info, warn};

/// What happened during one control tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Tick index the command was computed for.
    pub tick: u64,
    /// Whether the schedule rotated at the start of this tick.
    pub rotated: bool,
    /// Contact row the command was computed with.
    pub contacts: ContactRow,
    pub command: IkCommand,
}

// ---------------------------------------------------------------------------
// ControlLoop
// ---------------------------------------------------------------------------

/// Kinematic control loop for one robot.
#[derive(Clone, Debug)]
pub struct ControlLoop<K> {
    model: K,
    ik: WholeBodyIk,
    schedule: ContactSchedule,
    clock: ControlClock,
    cadence: Cadence,
    q: DVector<f64>,
    v: DVector<f64>,
}

impl<K: KinematicsEvaluator> ControlLoop<K> {
    /// Build a loop at configuration `q0` with zero velocity.
    pub fn new(model: K, config: &StrideConfig, q0: DVector<f64>) -> Result<Self, StrideError> {
        let ik = WholeBodyIk::from_config(config)?;
        let schedule = ContactSchedule::from_config(&config.gait)?;
        let ticks_per_row = config.ticks_per_row()?;
        check_len(model.nq(), &q0)?;

        info!(
            rows = schedule.len(),
            ticks_per_row,
            control_dt = config.timing.control_dt,
            "control loop ready"
        );

        let v = DVector::zeros(model.nv());
        Ok(Self {
            model,
            ik,
            schedule,
            clock: ControlClock::new(config.timing.control_dt),
            cadence: Cadence::new(ticks_per_row as u64),
            q: q0,
            v,
        })
    }

    /// Run one control tick against `references`.
    ///
    /// A rejected command leaves `q` and `v` untouched; the tick still
    /// counts, so the schedule keeps its cadence.
    pub fn step<R>(&mut self, references: &R) -> Result<TickReport, ControlError>
    where
        R: ReferenceProvider + ?Sized,
    {
        let tick = self.clock.tick();
        let rotated = self.cadence.is_due_after_start(tick);
        if rotated {
            self.schedule.advance();
            debug!(tick, "schedule advanced");
        }

        let contacts = self.schedule.current_row();
        let command = self
            .ik
            .compute(&self.model, &self.q, &self.v, references, &contacts);
        self.clock.advance();

        if let Some(stage) = command.first_non_finite() {
            warn!(tick, %stage, "rejecting non-finite command");
            return Err(ControlError::NonFiniteCommand { stage });
        }

        let dt = self.clock.period().as_secs_f64();
        self.v += &command.ddq * dt;
        self.q = self.model.integrate(&self.q, &(&self.v * dt));

        Ok(TickReport {
            tick,
            rotated,
            contacts,
            command,
        })
    }

    /// Overwrite the measured state, e.g. with a fresh estimate.
    pub fn set_state(&mut self, q: DVector<f64>, v: DVector<f64>) -> Result<(), ControlError> {
        check_len(self.model.nq(), &q)?;
        check_len(self.model.nv(), &v)?;
        self.q = q;
        self.v = v;
        Ok(())
    }
}

impl<K> ControlLoop<K> {
    pub const fn model(&self) -> &K {
        &self.model
    }

    pub const fn ik(&self) -> &WholeBodyIk {
        &self.ik
    }

    pub const fn schedule(&self) -> &ContactSchedule {
        &self.schedule
    }

    pub const fn clock(&self) -> &ControlClock {
        &self.clock
    }

    /// Ticks between schedule rotations.
    pub const fn ticks_per_row(&self) -> u64 {
        self.cadence.every()
    }

    pub const fn q(&self) -> &DVector<f64> {
        &self.q
    }

    pub const fn v(&self) -> &DVector<f64> {
        &self.v
    }

    /// Elapsed control time in seconds.
    pub fn time(&self) -> f64 {
        self.clock.secs_f64()
    }
}

fn check_len(expected: usize, x: &DVector<f64>) -> Result<(), ControlError> {
    if x.len() == expected {
        Ok(())
    } else {
        Err(ControlError::DimensionMismatch {
            expected,
            got: x.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
