use serde_json::json;
use std::{
    env,
    io::{self, Write},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use spaceflight::{SimError, Simulation, SimulationConfig};

fn main() -> Result<(), SimError> {
    setup_logging();

    let config = match env::args().nth(1) {
        Some(path) => SimulationConfig::from_file(&path)?,
        None => {
            info!("No config file given, using defaults");
            SimulationConfig::default()
        }
    };
    let max_steps = config.max_steps;
    let report_every = config.report_every;
    let wandering = config.wander.is_some();
    // Discrete braking overshoots by at most one tick at the speed cap
    let tolerance = config.motor.max_speed * config.time_step;

    let mut sim = Simulation::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for _ in 0..max_steps {
        let report = sim.step();
        if report.step % report_every == 0 {
            let line = json!({ "report": report, "state": sim.frame() });
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        }
        if !wandering && sim.settled() {
            info!(
                "Settled after {} steps ({:.2}s) at distance {:?}",
                report.step, report.time, report.distance
            );
            break;
        }
    }

    let summary = json!({
        "steps": sim.steps(),
        "time": sim.time(),
        "distance": sim.distance_to_target(),
        "arrived": sim.arrived(tolerance),
        "state": sim.frame(),
    });
    writeln!(out, "{}", serde_json::to_string(&summary)?)?;
    out.flush()?;
    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
