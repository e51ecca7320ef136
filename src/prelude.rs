//! Wavedrift prelude module
//!
//! Re-exports the types most callers need to set up and run a simulation.

pub use crate::physics::math::{Scalar, TAU};

// Config
pub use crate::config::SimulationConfig;

// Errors
pub use crate::error::{RenderError, SimulationError};

// Physics
pub use crate::physics::analytic::CosineWave;
pub use crate::physics::integrators::{
    ExplicitEuler, Heun, Integrator, IntegratorRegistry, RungeKuttaFourthOrder,
};
pub use crate::physics::profiles::InitialProfile;
pub use crate::physics::{Grid, LinearKdv, State, TimeParams, third_derivative};

// Driver and output
pub use crate::diagnostics::FieldDiagnostics;
pub use crate::render::{Renderer, Snapshot, SnapshotRecorder, TextPlot};
pub use crate::simulation::{Phase, RunSummary, Simulation};
