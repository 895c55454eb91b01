//! Stride quadruped controller CLI.
//!
//! Provides three modes of operation:
//! - `run`: Headless kinematic rollout lifting one foot, with tracking statistics
//! - `schedule`: Print the contact schedule for a gait
//! - `info`: Print crate versions and the effective configuration

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::DVector;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stride_control::{ControlLoop, FootLiftPlanner, TrackingStats, DEMO_LIFT_HEIGHT, DEMO_LIFT_RATE};
use stride_core::{StrideConfig, StrideError, FOOT_NAMES};
use stride_gait::{ContactSchedule, GaitPattern};
use stride_ik::{Foot, KinematicsEvaluator, References};
use stride_model::QuadrupedModel;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Whole-body kinematic control for a Solo12-class quadruped.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lift one foot along `h (1 - cos(ωt))` and report tracking error.
    Run {
        /// Number of control ticks.
        #[arg(short = 'n', long, default_value_t = 1000)]
        ticks: u64,

        /// Foot to lift.
        #[arg(short, long, value_enum, default_value_t = FootArg::Hl)]
        foot: FootArg,

        /// Lift height `h` in metres (peak is `2h`).
        #[arg(long, default_value_t = DEMO_LIFT_HEIGHT)]
        height: f64,

        /// Lift angular rate `ω` in rad/s.
        #[arg(long, default_value_t = DEMO_LIFT_RATE)]
        rate: f64,

        /// Print progress every this many ticks (0 disables).
        #[arg(long, default_value_t = 100)]
        report_every: u64,
    },

    /// Print the contact schedule, one row per line.
    Schedule {
        /// Use a predefined pattern instead of the configured phase offsets.
        #[arg(short, long, value_enum)]
        gait: Option<GaitArg>,
    },

    /// Print crate information and configuration.
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum FootArg {
    Fl,
    Fr,
    Hl,
    Hr,
}

impl From<FootArg> for Foot {
    fn from(arg: FootArg) -> Self {
        match arg {
            FootArg::Fl => Self::FrontLeft,
            FootArg::Fr => Self::FrontRight,
            FootArg::Hl => Self::HindLeft,
            FootArg::Hr => Self::HindRight,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GaitArg {
    Stand,
    Trot,
    Walk,
    Bound,
    Pace,
}

impl From<GaitArg> for GaitPattern {
    fn from(arg: GaitArg) -> Self {
        match arg {
            GaitArg::Stand => Self::Stand,
            GaitArg::Trot => Self::Trot,
            GaitArg::Walk => Self::Walk,
            GaitArg::Bound => Self::Bound,
            GaitArg::Pace => Self::Pace,
        }
    }
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn load_config(path: Option<&Path>) -> Result<StrideConfig, StrideError> {
    match path {
        Some(path) => Ok(StrideConfig::from_file(path)?),
        None => {
            let config = StrideConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

fn run_lift(
    config: &StrideConfig,
    ticks: u64,
    foot: Foot,
    height: f64,
    rate: f64,
    report_every: u64,
) -> Result<(), StrideError> {
    let model = QuadrupedModel::solo12();
    let q0 = model.neutral_configuration();
    let mut control = ControlLoop::new(model, config, q0)?;

    let rest = DVector::zeros(control.model().nv());
    let stance = References::hold_states(&control.model().evaluate(control.q(), &rest));
    let mut planner = FootLiftPlanner::new(stance, foot, height, rate);
    let mut stats = TrackingStats::new();

    info!(foot = foot.name(), height, rate, ticks, "starting lift rollout");

    for _ in 0..ticks {
        planner.set_time(control.time());
        let states = control.model().evaluate(control.q(), control.v());
        let actual = states.feet[foot.index()].position;
        let target = planner.lifted_target();
        stats.record(&actual, &target);

        let report = control.step(&planner)?;
        if report_every > 0 && report.tick % report_every == 0 {
            println!(
                "{}: {} z={:.4} ref={:.4} err={:.2e}",
                control.clock(),
                foot.name(),
                actual.z,
                target.z,
                (actual - target).norm()
            );
        }
    }

    println!(
        "\ntracking: samples={}, rms={:.3e}, max={:.3e}",
        stats.samples,
        stats.rms().unwrap_or(0.0),
        stats.max()
    );
    Ok(())
}

fn run_schedule(config: &StrideConfig, gait: Option<GaitArg>) -> Result<(), StrideError> {
    let gait_config = match gait {
        Some(arg) => GaitPattern::from(arg).config(config.gait.period, config.gait.step),
        None => config.gait.clone(),
    };
    let schedule = ContactSchedule::from_config(&gait_config)?;

    println!("row  {}", FOOT_NAMES.join(" "));
    for (i, row) in schedule.rows().enumerate() {
        let flags: Vec<&str> = row.iter().map(|&c| if c { " 1" } else { " 0" }).collect();
        println!("{i:>3} {}", flags.join(" "));
    }
    println!(
        "\nrows={}, stance entries={}/{}",
        schedule.len(),
        schedule.total_stance(),
        schedule.len() * FOOT_NAMES.len()
    );
    Ok(())
}

fn run_info(config: &StrideConfig) -> Result<(), StrideError> {
    println!("stride v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  stride-core    {}", env!("CARGO_PKG_VERSION"));
    println!("  stride-gait    {}", env!("CARGO_PKG_VERSION"));
    println!("  stride-ik      {}", env!("CARGO_PKG_VERSION"));
    println!("  stride-model   {}", env!("CARGO_PKG_VERSION"));
    println!("  stride-control {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("control_dt:     {} s", config.timing.control_dt);
    println!("gait period:    {} s", config.gait.period);
    println!("gait step:      {} s", config.gait.step);
    println!("ticks per row:  {}", config.ticks_per_row()?);
    println!("damping:        {}", config.solver.damping);
    println!("stance gating:  {}", config.solver.gate_stance_feedback);
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Some(Commands::Run {
            ticks,
            foot,
            height,
            rate,
            report_every,
        }) => run_lift(&config, ticks, foot.into(), height, rate, report_every),
        Some(Commands::Schedule { gait }) => run_schedule(&config, gait),
        Some(Commands::Info) => run_info(&config),
        None => {
            // Default: the hind-left lift demo
            run_lift(&config, 1000, Foot::HindLeft, DEMO_LIFT_HEIGHT, DEMO_LIFT_RATE, 100)
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
