use std::{env, time::Duration};

use clap::{Parser, ValueEnum};

use orrery::{
    clock::TimeScale,
    game::system::SolarSystem,
    scheduler::{DriveMode, Scheduler},
    snapshot::Snapshot,
};
use tokio::time::sleep;

use anyhow::Result;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Free,
    Fixed,
}

#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    #[arg(value_name = "CONFIG", default_value = "planets.yml")]
    config: String,

    #[arg(short, long, value_enum, default_value_t = Mode::Free)]
    mode: Mode,

    #[arg(short, long, default_value_t = DriveMode::FRAMES_PER_SECOND * DriveMode::TICKS_PER_FRAME, value_name = "HZ")]
    frequency: f64,

    #[arg(long, default_value_t = 200, value_name = "MICROSECONDS")]
    pause_us: u64,

    #[arg(short, long, default_value_t = TimeScale::DEFAULT)]
    time_scale: f64,

    #[arg(short, long, value_name = "SECONDS")]
    stop_after: Option<u64>,

    #[arg(short, long, default_value_t = 1, value_name = "SECONDS")]
    report_every: u64,

    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(long, default_value = "orrery::(.*)", value_name = "REGEX")]
    trace_filter: String,

    #[arg(
        long,
        default_value = "INFO",
        value_name = "TRACE|DEBUG|INFO|WARN|ERROR"
    )]
    trace_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env::set_var("RUST_LOG", &args.trace_level);
    common::trace::init(Some(args.trace_filter.clone()));

    let system = SolarSystem::from_path(&args.config)?;

    let mode = match args.mode {
        Mode::Free => DriveMode::FreeRunning {
            pause: Duration::from_micros(args.pause_us),
        },
        Mode::Fixed => DriveMode::FixedRate {
            frequency: args.frequency,
        },
    };

    let scheduler = Scheduler::new(mode, TimeScale::new(args.time_scale)?)?;
    let physics = scheduler.spawn(system);
    let mut snapshots = physics.subscribe();

    let report_period = Duration::from_secs(args.report_every.max(1));
    let deadline = async {
        match args.stop_after {
            Some(stop_after) => sleep(Duration::from_secs(stop_after)).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    let mut report_tick = tokio::time::interval(report_period);
    report_tick.tick().await;

    loop {
        tokio::select! {
            _ = report_tick.tick() => {
                let snapshot = snapshots.borrow_and_update().clone();
                report(&snapshot, args.json)?;
            },
            _ = &mut deadline => {
                log::info!("Stopping after {}s", args.stop_after.unwrap_or_default());
                break;
            },
            result = tokio::signal::ctrl_c() => {
                result?;
                log::info!("Interrupted");
                break;
            },
        }
    }

    let time_scale = physics.borrow_time_scale().get();
    let system = physics.shutdown().await?;
    report(&system.snapshot(time_scale), args.json)?;

    for planet in system.borrow_planets() {
        log::info!(
            "{:<10} r = {:.4e} m, |v| = {:.1} m/s, {} moon(s)",
            planet.borrow_name(),
            planet.get_position().norm(),
            planet.get_velocity().norm(),
            planet.borrow_moons().len()
        );
    }

    Ok(())
}

fn report(snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else {
        log::info!(
            "tick {} | {:.2} days simulated | time scale {} | {} bodies",
            snapshot.tick,
            snapshot.elapsed / 86_400.,
            snapshot.time_scale,
            snapshot.bodies.len()
        );
    }
    Ok(())
}
