//! Integration test: closed-loop kinematic rollouts on the Solo12 model.
//!
//! Checks that:
//! 1. The contact schedule rotates exactly once every K control ticks
//! 2. A command containing NaN is rejected without touching the state
//! 3. A foot lifted along a smooth profile tracks its reference while the
//!    base and the other feet hold still

use approx::assert_relative_eq;
use nalgebra::DVector;
use stride_control::{ControlLoop, FootLiftPlanner, TrackingStats};
use stride_core::{CommandStage, ControlError, StrideConfig};
use stride_gait::ContactSchedule;
use stride_ik::{Foot, KinematicsEvaluator, References};
use stride_model::QuadrupedModel;

fn solo_loop(config: &StrideConfig) -> ControlLoop<QuadrupedModel> {
    let model = QuadrupedModel::solo12();
    let q0 = model.neutral_configuration();
    ControlLoop::new(model, config, q0).unwrap()
}

fn stance(control: &ControlLoop<QuadrupedModel>) -> References {
    let v = DVector::zeros(control.model().nv());
    References::hold_states(&control.model().evaluate(control.q(), &v))
}

#[test]
fn schedule_rotates_every_k_ticks() {
    let config = StrideConfig::default();
    let initial = ContactSchedule::from_config(&config.gait).unwrap();
    let mut control = solo_loop(&config);
    let refs = stance(&control);
    let k = control.ticks_per_row();
    assert_eq!(k, 20);

    for tick in 0..(3 * k + 5) {
        let report = control.step(&refs).unwrap();
        assert_eq!(report.tick, tick);
        assert_eq!(report.rotated, tick > 0 && tick % k == 0, "tick {tick}");

        let row = usize::try_from(tick / k).unwrap() % initial.len();
        assert_eq!(Some(report.contacts), initial.row(row), "tick {tick}");
    }
}

#[test]
fn full_cycle_restores_schedule() {
    let config = StrideConfig::default();
    let initial = ContactSchedule::from_config(&config.gait).unwrap();
    let mut control = solo_loop(&config);
    let refs = stance(&control);

    // Rotations happen at ticks K..=N*K, so N*K + 1 ticks complete the cycle
    let ticks = control.ticks_per_row() * initial.len() as u64 + 1;
    for _ in 0..ticks {
        control.step(&refs).unwrap();
    }
    assert_eq!(control.schedule(), &initial);
}

#[test]
fn non_finite_references_are_rejected() {
    let mut control = solo_loop(&StrideConfig::default());
    let good = stance(&control);
    let mut bad = good.clone();
    bad.feet.positions[Foot::FrontLeft.index()].x = f64::NAN;

    control.step(&good).unwrap();
    let (q, v) = (control.q().clone(), control.v().clone());

    let err = control.step(&bad).unwrap_err();
    assert_eq!(
        err,
        ControlError::NonFiniteCommand {
            stage: CommandStage::Acceleration
        }
    );
    assert_eq!(control.q(), &q);
    assert_eq!(control.v(), &v);
    assert_eq!(control.clock().tick(), 2);

    // The loop carries on once references are sane again
    let report = control.step(&good).unwrap();
    assert_eq!(report.tick, 2);
}

#[test]
fn lifted_foot_tracks_reference() {
    let mut control = solo_loop(&StrideConfig::default());
    let hold = stance(&control);
    let base_start = hold.base.position;
    let mut planner = FootLiftPlanner::new(hold.clone(), Foot::HindLeft, 0.05, 10.0);

    let mut lifted = TrackingStats::new();
    let mut planted = TrackingStats::new();
    let mut peak: f64 = 0.0;

    for _ in 0..600 {
        planner.set_time(control.time());
        let states = control
            .model()
            .evaluate(control.q(), control.v());
        let foot = &states.feet[Foot::HindLeft.index()];
        lifted.record(&foot.position, &planner.lifted_target());
        peak = peak.max(foot.position.z);
        for other in [Foot::FrontLeft, Foot::FrontRight, Foot::HindRight] {
            let i = other.index();
            planted.record(&states.feet[i].position, &hold.feet.positions[i]);
        }

        control.step(&planner).unwrap();
    }

    assert_eq!(lifted.samples, 600);
    assert!(peak > 0.09, "foot only reached {peak}");
    assert!(lifted.max() < 5e-3, "max tracking error {}", lifted.max());
    assert!(lifted.rms().unwrap() < 2e-3);
    assert!(planted.max() < 5e-3, "planted feet drifted {}", planted.max());

    let base = stride_ik::free_flyer::base_position(control.q());
    assert_relative_eq!(base, base_start, epsilon = 5e-3);
}
