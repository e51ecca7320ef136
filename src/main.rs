use anyhow::Context;
use clap::Parser;
use std::io;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wavedrift::cli::{self, Args};
use wavedrift::physics::analytic::CosineWave;
use wavedrift::render::TextPlot;
use wavedrift::simulation::{RunSummary, Simulation};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.list_integrators {
        cli::handle_list_integrators();
        return Ok(());
    }

    let config = cli::load_and_apply_config(&args)?;
    config.validate()?;

    if let Some(path) = &args.write_config {
        config
            .save(path)
            .with_context(|| format!("writing configuration to {}", path.display()))?;
        info!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let mut simulation = Simulation::from_config(&config)?;
    let summary = if args.plot {
        let mut plot = TextPlot::new(io::stdout().lock());
        simulation.run_with(&mut plot, config.output.snapshot_every)?
    } else {
        simulation.run()?
    };

    print_summary(&summary);

    if let Some(wave) = CosineWave::from_profile(config.grid.length, &config.initial) {
        let error = wave.max_error(simulation.grid(), &simulation.snapshot());
        println!("max |u - exact|: {error:.3e}");
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let initial = summary.initial_diagnostics;
    let last = summary.final_diagnostics;

    println!(
        "{} steps of {} to t = {:.6} in {:.3?}",
        summary.steps, summary.integrator, summary.final_time, summary.elapsed
    );
    println!("mass:    {:+.9e} -> {:+.9e}", initial.mass, last.mass);
    println!("energy:  {:.9e} -> {:.9e}", initial.energy, last.energy);
    println!("max |u|: {:.6} -> {:.6}", initial.max_abs, last.max_abs);
}
