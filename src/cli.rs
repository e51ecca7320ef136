//! Command line interface for Wavedrift

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, IntegratorConfig, SimulationConfig};
use crate::physics::integrators::IntegratorRegistry;
use crate::physics::profiles::{CosineProfile, InitialProfile, PulseProfile, RandomModesProfile};

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be loaded
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] ConfigError),

    /// Invalid integrator name provided
    #[error("Invalid integrator: {0}")]
    InvalidIntegrator(String),
}

/// Initial profile families selectable with `--profile`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileKind {
    Cosine,
    Gaussian,
    Sech2,
    #[value(name = "random_modes")]
    RandomModes,
}

impl ProfileKind {
    fn default_profile(self) -> InitialProfile {
        match self {
            Self::Cosine => InitialProfile::Cosine(CosineProfile::default()),
            Self::Gaussian => InitialProfile::Gaussian(PulseProfile::default()),
            Self::Sech2 => InitialProfile::Sech2(PulseProfile::default()),
            Self::RandomModes => InitialProfile::RandomModes(RandomModesProfile::default()),
        }
    }
}

/// Wavedrift - linear KdV on a periodic grid
#[derive(Parser, Debug)]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"),
    about,
    long_about = None
)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of grid points (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub points: Option<usize>,

    /// Domain length (overrides config file)
    #[arg(short = 'l', long, value_name = "LENGTH")]
    pub length: Option<f64>,

    /// Total simulated time (overrides config file)
    #[arg(short = 't', long, value_name = "TIME")]
    pub total_time: Option<f64>,

    /// Time step (overrides config file)
    #[arg(long, value_name = "DT")]
    pub dt: Option<f64>,

    /// Integrator type (e.g., explicit_euler, heun, rk4)
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub integrator: Option<String>,

    /// Initial profile, with its default parameters
    #[arg(long, value_enum, value_name = "KIND")]
    pub profile: Option<ProfileKind>,

    /// Wave number of a cosine profile, or mode count of a random_modes profile
    #[arg(long, value_name = "M")]
    pub mode: Option<u32>,

    /// Random seed for the random_modes profile
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Steps between snapshots (overrides config file)
    #[arg(long, value_name = "STEPS")]
    pub snapshot_every: Option<usize>,

    /// Print a character plot of every snapshot
    #[arg(short = 'p', long)]
    pub plot: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<PathBuf>,
}

/// Handles the --list-integrators flag by printing available integrators
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::new().with_standard_integrators();
    println!("Available integrators:");
    for name in registry.list_available() {
        if let Ok(integrator) = registry.create(&name) {
            println!("  - {name} (order {})", integrator.convergence_order());
        }
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Loads configuration from file or the user layers, then applies
/// command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        SimulationConfig::load(config_path)?
    } else {
        SimulationConfig::load_from_user_config()
    };

    apply_overrides(&mut config, args)?;
    Ok(config)
}

/// Applies every flag that was given on top of `config`.
pub fn apply_overrides(config: &mut SimulationConfig, args: &Args) -> Result<(), CliError> {
    if let Some(points) = args.points {
        info!("Overriding grid points to: {points}");
        config.grid.points = points;
    }

    if let Some(length) = args.length {
        info!("Overriding domain length to: {length}");
        config.grid.length = length;
    }

    if let Some(total_time) = args.total_time {
        info!("Overriding total time to: {total_time}");
        config.time.total_time = total_time;
    }

    if let Some(dt) = args.dt {
        info!("Overriding time step to: {dt}");
        config.time.dt = dt;
    }

    if let Some(integrator_type) = &args.integrator {
        IntegratorRegistry::default()
            .create(integrator_type)
            .map_err(CliError::InvalidIntegrator)?;

        info!("Using integrator: {integrator_type}");
        config.integrator = IntegratorConfig {
            integrator_type: integrator_type.clone(),
        };
    }

    if let Some(kind) = args.profile {
        config.initial = kind.default_profile();
    }

    if let Some(mode) = args.mode {
        match &mut config.initial {
            InitialProfile::Cosine(cosine) => cosine.mode = mode,
            InitialProfile::RandomModes(random) => random.modes = mode,
            other => warn!("--mode has no effect on a {} profile", other.name()),
        }
    }

    if let Some(seed) = args.seed {
        match &mut config.initial {
            InitialProfile::RandomModes(random) => {
                info!("Using random seed: {seed}");
                random.seed = seed;
            }
            other => warn!("--seed has no effect on a {} profile", other.name()),
        }
    }

    if let Some(every) = args.snapshot_every {
        config.output.snapshot_every = every;
    }

    Ok(())
}
