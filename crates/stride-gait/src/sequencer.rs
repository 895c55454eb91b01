//! Periodic contact schedule for legged locomotion.
//!
//! The gait cycle is sampled every `step` seconds into `N = period / step`
//! rows. Each row holds one contact flag per foot (FL, FR, HL, HR). A foot is
//! in stance while `sin(2π (t - offset*period) / period) >= 0`, so every foot
//! spends half the cycle on the ground and the per-foot phase offset decides
//! when.
//!
//! Row 0 is always the current instant. Advancing the schedule rotates row 0
//! to the end, so the matrix shape and its set of rows never change.

use std::f64::consts::TAU;

use nalgebra::DMatrix;
use stride_core::{ConfigError, GaitConfig, N_FEET};

/// One schedule row: contact flag per foot, order FL, FR, HL, HR.
pub type ContactRow = [bool; N_FEET];

/// Predefined phase-offset patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GaitPattern {
    /// All feet on ground for the whole cycle.
    Stand,
    /// Diagonal pairs alternate: FL+HR and FR+HL.
    Trot,
    /// Feet lift one after the other, a quarter cycle apart.
    Walk,
    /// Front pair and hind pair alternate.
    Bound,
    /// Left pair and right pair alternate.
    Pace,
}

impl GaitPattern {
    /// Per-foot phase offsets as a fraction of the period.
    pub const fn phase_offsets(self) -> [f64; N_FEET] {
        match self {
            Self::Stand | Self::Trot => [0.0, 0.5, 0.5, 0.0],
            Self::Walk => [0.0, 0.5, 0.25, 0.75],
            Self::Bound => [0.0, 0.0, 0.5, 0.5],
            Self::Pace => [0.0, 0.5, 0.0, 0.5],
        }
    }

    /// Whether this pattern forces full four-foot stance.
    pub const fn is_full_stance(self) -> bool {
        matches!(self, Self::Stand)
    }

    /// Gait configuration for this pattern with the given timing.
    pub const fn config(self, period: f64, step: f64) -> GaitConfig {
        GaitConfig {
            period,
            step,
            phase_offsets: self.phase_offsets(),
            full_stance: self.is_full_stance(),
        }
    }
}

/// Binary contact schedule over one gait cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSchedule {
    rows: Vec<ContactRow>,
}

impl ContactSchedule {
    /// Build a schedule of `round(period / step)` rows.
    ///
    /// Rows 0 and `N / 2` are forced to four-foot stance so the cycle starts
    /// and crosses its midpoint in double support even when `sin` lands a
    /// hair below zero at the phase boundaries. With `full_stance` every
    /// entry is stance.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `step` does not divide `period`, either is
    /// not positive, or a phase offset lies outside `[0, 1)`.
    pub fn initialize(
        period: f64,
        step: f64,
        phase_offsets: [f64; N_FEET],
        full_stance: bool,
    ) -> Result<Self, ConfigError> {
        Self::from_config(&GaitConfig {
            period,
            step,
            phase_offsets,
            full_stance,
        })
    }

    /// Build a schedule from a [`GaitConfig`], validating it first.
    ///
    /// # Errors
    ///
    /// See [`initialize`](Self::initialize).
    #[allow(clippy::cast_precision_loss)]
    pub fn from_config(config: &GaitConfig) -> Result<Self, ConfigError> {
        let n = config.validate()?;
        let period = config.period;

        let mut rows = Vec::with_capacity(n);
        for i in 0..n {
            let t = i as f64 * config.step;
            let mut row = [false; N_FEET];
            for (foot, contact) in row.iter_mut().enumerate() {
                let phase = (t - config.phase_offsets[foot] * period) * TAU / period;
                *contact = phase.sin() >= 0.0;
            }
            rows.push(row);
        }

        rows[0] = [true; N_FEET];
        rows[n / 2] = [true; N_FEET];

        if config.full_stance {
            rows.fill([true; N_FEET]);
        }

        tracing::debug!(
            rows = n,
            period,
            step = config.step,
            full_stance = config.full_stance,
            "contact schedule initialized"
        );

        Ok(Self { rows })
    }

    /// Rotate the schedule by one row: row 0 moves to the end.
    pub fn advance(&mut self) {
        self.rows.rotate_left(1);
    }

    /// Contact flags at the current instant (row 0).
    pub fn current_row(&self) -> ContactRow {
        self.rows[0]
    }

    /// Contact flags `i` rows ahead of now, if within the cycle.
    pub fn row(&self, i: usize) -> Option<ContactRow> {
        self.rows.get(i).copied()
    }

    /// Number of rows in one gait cycle.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: a schedule has at least one row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows from the current instant forward.
    pub fn rows(&self) -> impl Iterator<Item = &ContactRow> {
        self.rows.iter()
    }

    /// Number of feet in stance at the current instant.
    pub fn stance_count(&self) -> usize {
        self.rows[0].iter().filter(|&&c| c).count()
    }

    /// Number of stance entries over the whole cycle.
    pub fn total_stance(&self) -> usize {
        self.rows.iter().flatten().filter(|&&c| c).count()
    }

    /// Export as an `N × 4` matrix of 0.0 / 1.0 entries.
    pub fn as_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.rows.len(), N_FEET, |i, foot| {
            if self.rows[i][foot] {
                1.0
            } else {
                0.0
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TROT: [f64; 4] = [0.0, 0.5, 0.5, 0.0];

    #[test]
    fn row_count_matches_period_over_step() {
        for (period, step, expected) in [(0.6, 0.02, 30), (0.32, 0.02, 16), (1.0, 0.001, 1000), (0.5, 0.1, 5)] {
            let s = ContactSchedule::initialize(period, step, TROT, false).unwrap();
            assert_eq!(s.len(), expected, "period={period} step={step}");
            assert_eq!(s.as_matrix().shape(), (expected, 4));
        }
    }

    #[test]
    fn entries_are_binary() {
        let s = ContactSchedule::initialize(0.6, 0.02, [0.0, 0.25, 0.5, 0.75], false).unwrap();
        let m = s.as_matrix();
        assert!(m.iter().all(|&x| x == 0.0 || x == 1.0));
    }

    #[test]
    fn start_and_midpoint_are_full_stance() {
        let offsets = [
            TROT,
            [0.0, 0.5, 0.25, 0.75],
            [0.1, 0.3, 0.7, 0.9],
            [0.99, 0.0, 0.5, 0.01],
        ];
        for phase_offsets in offsets {
            for (period, step) in [(0.6, 0.02), (0.5, 0.1), (0.34, 0.02)] {
                let s = ContactSchedule::initialize(period, step, phase_offsets, false).unwrap();
                let mid = s.len() / 2;
                assert_eq!(s.row(0), Some([true; 4]));
                assert_eq!(s.row(mid), Some([true; 4]), "offsets={phase_offsets:?}");
            }
        }
    }

    #[test]
    fn trot_diagonal_pairs() {
        let s = ContactSchedule::initialize(0.6, 0.02, TROT, false).unwrap();
        // First quarter: FL+HR in stance, FR+HL in swing
        assert_eq!(s.row(1), Some([true, false, false, true]));
        assert_eq!(s.row(7), Some([true, false, false, true]));
        // Second half: pairs swap
        assert_eq!(s.row(16), Some([false, true, true, false]));
        assert_eq!(s.row(29), Some([false, true, true, false]));
    }

    #[test]
    fn every_foot_spends_about_half_cycle_in_stance() {
        let s = ContactSchedule::initialize(0.6, 0.02, [0.0, 0.25, 0.5, 0.75], false).unwrap();
        for foot in 0..4 {
            let stance = s.rows().filter(|r| r[foot]).count();
            assert!((15..=18).contains(&stance), "foot {foot}: {stance}");
        }
    }

    #[test]
    fn full_stance_override_is_all_ones() {
        let s = ContactSchedule::initialize(0.6, 0.02, TROT, true).unwrap();
        assert_eq!(s.len(), 30);
        assert!(s.as_matrix().iter().all(|&x| x == 1.0));
    }

    #[test]
    fn advance_rotates_row_zero_to_end() {
        let mut s = ContactSchedule::initialize(0.6, 0.02, TROT, false).unwrap();
        let before: Vec<ContactRow> = s.rows().copied().collect();
        s.advance();
        assert_eq!(s.len(), before.len());
        assert_eq!(s.current_row(), before[1]);
        assert_eq!(s.row(s.len() - 1), Some(before[0]));
    }

    #[test]
    fn advance_n_times_is_identity() {
        for offsets in [TROT, [0.0, 0.5, 0.25, 0.75], [0.2, 0.4, 0.6, 0.8]] {
            let mut s = ContactSchedule::initialize(0.6, 0.02, offsets, false).unwrap();
            let original = s.clone();
            for _ in 0..s.len() {
                s.advance();
                assert_eq!(s.len(), original.len());
            }
            assert_eq!(s, original);
        }
    }

    #[test]
    fn advance_preserves_row_multiset() {
        let mut s = ContactSchedule::initialize(0.6, 0.02, [0.0, 0.25, 0.5, 0.75], false).unwrap();
        let mut before: Vec<ContactRow> = s.rows().copied().collect();
        for _ in 0..7 {
            s.advance();
        }
        let mut after: Vec<ContactRow> = s.rows().copied().collect();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn stance_count_of_current_row() {
        let mut s = ContactSchedule::initialize(0.6, 0.02, TROT, false).unwrap();
        assert_eq!(s.stance_count(), 4);
        s.advance();
        assert_eq!(s.stance_count(), 2);
    }

    #[test]
    fn total_stance_counts_every_row() {
        let stand = ContactSchedule::initialize(0.6, 0.02, TROT, true).unwrap();
        assert_eq!(stand.total_stance(), 120);
        assert_eq!(stand.stance_count(), 4);

        let mut trot = ContactSchedule::initialize(0.6, 0.02, TROT, false).unwrap();
        let total = trot.total_stance();
        assert_eq!(total, trot.as_matrix().sum() as usize);
        trot.advance();
        assert_eq!(trot.total_stance(), total);
    }

    #[test]
    fn rejects_non_dividing_step() {
        let err = ContactSchedule::initialize(0.6, 0.07, TROT, false).unwrap_err();
        assert!(matches!(err, ConfigError::StepDoesNotDividePeriod { .. }));
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        assert!(matches!(
            ContactSchedule::initialize(0.6, 0.02, [0.0, 0.5, 0.5, 1.0], false),
            Err(ConfigError::PhaseOffsetOutOfRange { foot: 3, .. })
        ));
        assert!(ContactSchedule::initialize(0.6, 0.02, [f64::NAN, 0.5, 0.5, 0.0], false).is_err());
    }

    #[test]
    fn rejects_non_positive_timing() {
        assert!(matches!(
            ContactSchedule::initialize(0.0, 0.02, TROT, false),
            Err(ConfigError::InvalidPeriod(_))
        ));
        assert!(matches!(
            ContactSchedule::initialize(0.6, -0.02, TROT, false),
            Err(ConfigError::InvalidStep(_))
        ));
    }

    #[test]
    fn stand_pattern_builds_full_stance() {
        let s = ContactSchedule::from_config(&GaitPattern::Stand.config(0.6, 0.02)).unwrap();
        assert!(s.rows().all(|r| r.iter().all(|&c| c)));
    }

    #[test]
    fn bound_pattern_pairs_front_and_hind() {
        let s = ContactSchedule::from_config(&GaitPattern::Bound.config(0.6, 0.02)).unwrap();
        for row in s.rows() {
            assert_eq!(row[0], row[1]);
            assert_eq!(row[2], row[3]);
        }
    }
}
