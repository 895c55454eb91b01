use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ControlClock
// ---------------------------------------------------------------------------

/// Integer-nanosecond control clock with a tick counter.
///
/// Avoids floating-point accumulation errors by tracking elapsed time as a
/// monotonically increasing `u64` nanosecond count. One tick is one
/// whole-body IK solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlClock {
    nanos: u64,
    tick: u64,
    dt_nanos: u64,
}

impl ControlClock {
    /// Create a clock at zero with the given control period in seconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(dt_secs: f64) -> Self {
        Self {
            nanos: 0,
            tick: 0,
            dt_nanos: (dt_secs * 1_000_000_000.0).round() as u64,
        }
    }

    /// Index of the current tick (zero before the first advance).
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Raw nanosecond count.
    #[must_use]
    pub const fn nanos(&self) -> u64 {
        self.nanos
    }

    /// Control period as a [`Duration`].
    #[must_use]
    pub const fn period(&self) -> Duration {
        Duration::from_nanos(self.dt_nanos)
    }

    /// Elapsed seconds as `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn secs_f64(&self) -> f64 {
        self.nanos as f64 / 1_000_000_000.0
    }

    /// Advance by one control period.
    pub const fn advance(&mut self) {
        self.nanos = self.nanos.saturating_add(self.dt_nanos);
        self.tick = self.tick.saturating_add(1);
    }

    /// Reset time and tick count to zero, keeping the period.
    pub const fn reset(&mut self) {
        self.nanos = 0;
        self.tick = 0;
    }
}

impl fmt::Display for ControlClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {} ({:.3}s)", self.tick, self.secs_f64())
    }
}

// ---------------------------------------------------------------------------
// Cadence
// ---------------------------------------------------------------------------

/// A slower rate expressed as a whole number of control ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cadence {
    every: u64,
}

impl Cadence {
    /// Fire once every `every` ticks. A value of zero is treated as one.
    #[must_use]
    pub const fn new(every: u64) -> Self {
        Self {
            every: if every == 0 { 1 } else { every },
        }
    }

    /// Ticks between two firings.
    #[must_use]
    pub const fn every(&self) -> u64 {
        self.every
    }

    /// True on ticks `0, K, 2K, ...`.
    #[must_use]
    pub const fn is_due(&self, tick: u64) -> bool {
        tick % self.every == 0
    }

    /// True on ticks `K, 2K, ...`: like [`is_due`](Self::is_due) but skipping
    /// tick zero, where the freshly built state is already current.
    #[must_use]
    pub const fn is_due_after_start(&self, tick: u64) -> bool {
        tick > 0 && self.is_due(tick)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
