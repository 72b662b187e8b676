//! Drives the integrator at its own cadence, independent of any renderer.
//!
//! The physics task owns the [`SolarSystem`] and is its only writer. After every
//! complete tick it publishes a [`Snapshot`] on a watch channel, so readers only
//! ever see whole ticks and never hold up the physics.

use crate::clock::{SimulationClock, TimeScale};
use crate::error::Error;
use crate::game::repr::Seconds;
use crate::game::system::SolarSystem;
use crate::snapshot::Snapshot;
use crate::Result;
use crossbeam::channel::{Receiver, Sender, TryRecvError};
use log::{debug, info};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriveMode {
    /// `time_step = time_scale × measured wall time`, one tick per iteration,
    /// then a short pause on a dedicated thread so the loop does not saturate
    /// a core.
    FreeRunning { pause: Duration },
    /// One tick per timer period, `time_step = time_scale / frequency`.
    FixedRate { frequency: f64 },
}

impl DriveMode {
    pub const FRAMES_PER_SECOND: f64 = 60.;
    pub const TICKS_PER_FRAME: f64 = 16.;
    pub const FREE_RUNNING_PAUSE: Duration = Duration::from_micros(200);

    pub fn free_running() -> DriveMode {
        DriveMode::FreeRunning {
            pause: Self::FREE_RUNNING_PAUSE,
        }
    }

    pub fn fixed_rate() -> DriveMode {
        DriveMode::FixedRate {
            frequency: Self::FRAMES_PER_SECOND * Self::TICKS_PER_FRAME,
        }
    }
}

impl Default for DriveMode {
    fn default() -> Self {
        DriveMode::free_running()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub time_scale: f64,
    pub time_step: Seconds,
}

pub struct Scheduler {
    mode: DriveMode,
    clock: SimulationClock,
    time_scale: TimeScale,
}

impl Scheduler {
    pub fn new(mode: DriveMode, time_scale: TimeScale) -> Result<Scheduler> {
        if let DriveMode::FixedRate { frequency } = mode {
            if !frequency.is_finite() || frequency <= 0. {
                return Err(Error::InvalidFrequency(frequency));
            }
        }

        Ok(Scheduler {
            mode,
            clock: SimulationClock::start(),
            time_scale,
        })
    }

    pub fn get_mode(&self) -> DriveMode {
        self.mode
    }

    pub fn borrow_time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    /// Runs exactly one tick. The time scale is read once, here, so a change
    /// lands on the very next tick.
    pub fn tick(&mut self, system: &mut SolarSystem) -> TickReport {
        let time_scale = self.time_scale.get();
        let wall = self.clock.sample();

        let time_step = match self.mode {
            DriveMode::FreeRunning { .. } => time_scale * wall.as_secs_f64(),
            DriveMode::FixedRate { frequency } => time_scale / frequency,
        };

        system.step(time_step);

        TickReport {
            time_scale,
            time_step,
        }
    }

    /// Ticks until a stop signal arrives, then hands the system back.
    ///
    /// Free-running drive sleeps for sub-millisecond pauses, which tokio timers
    /// can't express, so it runs on a blocking thread.
    pub async fn run(
        self,
        system: SolarSystem,
        snapshots: watch::Sender<Snapshot>,
        stop: Receiver<()>,
    ) -> Result<SolarSystem> {
        let mode = self.mode;
        match mode {
            DriveMode::FreeRunning { pause } => {
                tokio::task::spawn_blocking(move || self.run_free(system, snapshots, stop, pause))
                    .await
                    .map_err(|err| Error::CriticalFromPhysics(err.to_string()))?
            }
            DriveMode::FixedRate { frequency } => {
                self.run_fixed(system, snapshots, stop, frequency).await
            }
        }
    }

    fn run_free(
        mut self,
        mut system: SolarSystem,
        snapshots: watch::Sender<Snapshot>,
        stop: Receiver<()>,
        pause: Duration,
    ) -> Result<SolarSystem> {
        let mut throughput = self.start(&system, &snapshots);

        while !should_stop(&stop) {
            self.tick_and_publish(&mut system, &snapshots, &mut throughput);

            if pause.is_zero() {
                std::thread::yield_now();
            } else {
                std::thread::sleep(pause);
            }
        }

        info!("Stop signal received after {} ticks", system.get_ticks());
        Ok(system)
    }

    async fn run_fixed(
        mut self,
        mut system: SolarSystem,
        snapshots: watch::Sender<Snapshot>,
        stop: Receiver<()>,
        frequency: f64,
    ) -> Result<SolarSystem> {
        let mut interval = tokio::time::interval(Duration::from_secs_f64(1. / frequency));
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        let mut throughput = self.start(&system, &snapshots);

        while !should_stop(&stop) {
            self.tick_and_publish(&mut system, &snapshots, &mut throughput);
            interval.tick().await;
        }

        info!("Stop signal received after {} ticks", system.get_ticks());
        Ok(system)
    }

    fn start(&mut self, system: &SolarSystem, snapshots: &watch::Sender<Snapshot>) -> Throughput {
        info!(
            "Physics loop starts ({:?}) with {} bodies",
            self.mode,
            system.body_count()
        );
        snapshots.send_replace(system.snapshot(self.time_scale.get()));
        self.clock = SimulationClock::start();
        Throughput::start(system)
    }

    fn tick_and_publish(
        &mut self,
        system: &mut SolarSystem,
        snapshots: &watch::Sender<Snapshot>,
        throughput: &mut Throughput,
    ) {
        let report = self.tick(system);
        snapshots.send_replace(system.snapshot(report.time_scale));
        throughput.record(system, report.time_scale);
    }

    /// Moves the scheduler and the system onto a tokio task.
    pub fn spawn(self, system: SolarSystem) -> PhysicsHandle {
        let time_scale = self.time_scale.clone();
        let (snapshot_send, snapshot_recv) = watch::channel(system.snapshot(time_scale.get()));
        let (stop_send, stop_recv) = crossbeam::channel::bounded(1);

        let join = tokio::spawn(self.run(system, snapshot_send, stop_recv));

        PhysicsHandle {
            join,
            snapshots: snapshot_recv,
            stop: stop_send,
            time_scale,
        }
    }
}

/// A dropped handle stops the loop too.
fn should_stop(stop: &Receiver<()>) -> bool {
    !matches!(stop.try_recv(), Err(TryRecvError::Empty))
}

struct Throughput {
    since: Instant,
    ticks: u64,
}

impl Throughput {
    const REPORT_PERIOD: Duration = Duration::from_secs(1);

    fn start(system: &SolarSystem) -> Throughput {
        Throughput {
            since: Instant::now(),
            ticks: system.get_ticks(),
        }
    }

    fn record(&mut self, system: &SolarSystem, time_scale: f64) {
        let now = Instant::now();
        if now - self.since >= Self::REPORT_PERIOD {
            debug!(
                "{:.0} ticks/s, simulated {:.2} days, time scale {}",
                (system.get_ticks() - self.ticks) as f64 / (now - self.since).as_secs_f64(),
                system.get_elapsed() / 86_400.,
                time_scale
            );
            self.since = now;
            self.ticks = system.get_ticks();
        }
    }
}

/// Renderer-side view on a spawned physics task.
pub struct PhysicsHandle {
    join: JoinHandle<Result<SolarSystem>>,
    snapshots: watch::Receiver<Snapshot>,
    stop: Sender<()>,
    time_scale: TimeScale,
}

impl PhysicsHandle {
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn borrow_time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Signals the task and waits for the tick in flight to complete.
    pub async fn shutdown(self) -> Result<SolarSystem> {
        let _ = self.stop.try_send(());
        self.join
            .await
            .map_err(|err| Error::CriticalFromPhysics(err.to_string()))?
    }
}
