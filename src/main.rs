use pdsim::{
    bench_gravity, bench_verlet, CartesianSystem, ForceSource, Parameters, ParticleHandle,
    Recorder, Runtime2D, Runtime3D, Scenario, Scenario3D, ScenarioConfig, VerletIntegrator,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file name, resolved under the scenarios/ directory.
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,

    /// Write sampled trajectories to this CSV file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run the timing sweeps instead of a scenario.
    #[arg(long)]
    bench: bool,
}

fn setup_logging() -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

/// Drive one integrator through the configured run, sampling into a
/// recorder at the configured cadence.
fn run_integrator<C, S>(
    integrator: &mut VerletIntegrator<C, S>,
    parameters: &Parameters,
    handles: &[ParticleHandle],
) -> Result<Recorder<C>>
where
    C: CartesianSystem,
    S: ForceSource<C>,
{
    let mut recorder = Recorder::new();
    for &handle in handles {
        recorder.track(handle);
    }
    recorder.sample(integrator)?;

    let steps = parameters.step_count();
    for step in 0..steps {
        integrator.step(parameters.h0);
        if (step + 1) % parameters.sample_every == 0 {
            recorder.sample(integrator)?;
        }
    }
    info!(
        "ran {} steps of h0 = {} over {} bodies, {} samples",
        steps,
        parameters.h0,
        handles.len(),
        recorder.len()
    );
    Ok(recorder)
}

/// One row per sample: time, then per body the position and velocity
/// components.
fn write_csv<C: CartesianSystem>(recorder: &Recorder<C>, path: &Path) -> Result<()> {
    let dim = C::DIMENSION;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    write!(out, "t")?;
    for (body, _) in recorder.tracks().iter().enumerate() {
        for axis in 0..dim {
            write!(out, ",x{}_{}", body, axis)?;
        }
        for axis in 0..dim {
            write!(out, ",v{}_{}", body, axis)?;
        }
    }
    writeln!(out)?;

    for (sample, t) in recorder.times().iter().enumerate() {
        write!(out, "{}", t)?;
        for track in recorder.tracks() {
            for axis in 0..dim {
                write!(out, ",{}", track.positions[sample][axis])?;
            }
            for axis in 0..dim {
                write!(out, ",{}", track.velocities[sample][axis])?;
            }
        }
        writeln!(out)?;
    }
    info!("wrote {} samples to {}", recorder.len(), path.display());
    Ok(())
}

fn run_2d(mut scenario: Scenario, output: Option<&Path>) -> Result<()> {
    let parameters = scenario.parameters.clone();
    let recorder = match &mut scenario.runtime {
        Runtime2D::Field(integrator) => {
            run_integrator(integrator, &parameters, &scenario.handles)?
        }
        Runtime2D::Gravity(integrator) => {
            run_integrator(integrator, &parameters, &scenario.handles)?
        }
    };
    if let Some(path) = output {
        write_csv(&recorder, path)?;
    }
    Ok(())
}

fn run_3d(mut scenario: Scenario3D, output: Option<&Path>) -> Result<()> {
    let parameters = scenario.parameters.clone();
    let recorder = match &mut scenario.runtime {
        Runtime3D::Field(integrator) => {
            run_integrator(integrator, &parameters, &scenario.handles)?
        }
        Runtime3D::Gravity(integrator) => {
            run_integrator(integrator, &parameters, &scenario.handles)?
        }
    };
    if let Some(path) = output {
        write_csv(&recorder, path)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    setup_logging()?;
    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_verlet();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    info!("loaded scenario {}", args.file_name);

    if !scenario_cfg.engine.dimension {
        let scenario = Scenario::build_scenario(scenario_cfg)?;
        run_2d(scenario, args.output.as_deref())?;
    } else {
        let scenario = Scenario3D::build_scenario_3d(scenario_cfg)?;
        run_3d(scenario, args.output.as_deref())?;
    }

    Ok(())
}
