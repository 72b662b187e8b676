use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::time::{Duration, Instant};

use crate::error::Error;
use crate::Result;

/// Simulated seconds per wall-clock second, shared between the UI (writer)
/// and the physics task (reader).
#[derive(Clone, Debug)]
pub struct TimeScale {
    bits: Arc<AtomicU64>,
}

impl TimeScale {
    pub const DEFAULT: f64 = 3_000_000.;
    /// Value a paused scale resumes at when scaled up.
    pub const RESUME: f64 = 1.;

    pub fn new(value: f64) -> Result<TimeScale> {
        Self::check(value)?;
        Ok(TimeScale {
            bits: Arc::new(AtomicU64::new(value.to_bits())),
        })
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn set(&self, value: f64) -> Result<()> {
        Self::check(value)?;
        self.bits.store(value.to_bits(), Ordering::Release);
        Ok(())
    }

    /// Multiplies the current value by `factor`, which must keep it valid.
    /// A zero scale grows back from [`TimeScale::RESUME`] when `factor > 1`.
    pub fn scale_by(&self, factor: f64) -> Result<f64> {
        let current = self.get();
        let value = if current == 0. && factor > 1. {
            Self::RESUME
        } else {
            current * factor
        };
        self.set(value)?;
        Ok(value)
    }

    fn check(value: f64) -> Result<()> {
        if !value.is_finite() || value < 0. {
            return Err(Error::InvalidTimeScale(value));
        }
        Ok(())
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        TimeScale {
            bits: Arc::new(AtomicU64::new(Self::DEFAULT.to_bits())),
        }
    }
}

/// Wall-clock sampler. Each sample returns the time spent since the previous one.
#[derive(Debug)]
pub struct SimulationClock {
    last_sample: Instant,
}

impl SimulationClock {
    pub fn start() -> SimulationClock {
        SimulationClock {
            last_sample: Instant::now(),
        }
    }

    pub fn sample(&mut self) -> Duration {
        self.sample_at(Instant::now())
    }

    pub fn sample_at(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_sample);
        self.last_sample = now;
        elapsed
    }

    pub fn get_last_sample(&self) -> Instant {
        self.last_sample
    }
}
