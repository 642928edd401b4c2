use std::{env, io};

use orbitrack::orbitrack_errors::OrbitrackError;
use orbitrack::presets::OrbitPreset;
use orbitrack::propagator::{PropagationParams, Propagator};

/// Print the sampled path of a reference orbit as CSV, then its position after
/// a few elapsed times.
///
/// Usage: `cargo run --example orbit_path_csv -- [amor|apollo|aten|atira] [points]`
fn main() -> Result<(), OrbitrackError> {
    let mut args = env::args().skip(1);
    let preset: OrbitPreset = args.next().as_deref().unwrap_or("apollo").parse()?;
    let points = match args.next() {
        Some(s) => s
            .parse()
            .map_err(|_| OrbitrackError::InvalidPropagationParameter(format!("points = {s}")))?,
        None => 200,
    };

    let params = PropagationParams::builder().path_points(points).build()?;
    let propagator = Propagator::new(params)?;
    let elements = preset.elements()?;

    eprintln!("{elements}");
    eprintln!("NEO class: {}", elements.neo_class());

    let path = propagator.sample_path(&elements)?;
    path.write_csv(io::stdout())?;

    let period_s = elements.orbital_period() * orbitrack::constants::SECONDS_PER_DAY;
    for fraction in [0.0, 0.25, 0.5, 0.75] {
        let pos = propagator.position_at_time(&elements, fraction * period_s, 1.0);
        eprintln!(
            "t = {fraction:.2} T: ({:+.6}, {:+.6}, {:+.6}) AU, r = {:.6} AU",
            pos.x,
            pos.y,
            pos.z,
            pos.norm()
        );
    }

    Ok(())
}
