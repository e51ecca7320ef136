//! Fixed-step driver for one linear KdV run
//!
//! ```text
//! Initialized --advance--> Stepped(1) --> ... --> Stepped(Nt) = Complete
//! ```
//!
//! Every transition is one integrator step followed by a scan of the whole
//! state. The first NaN or infinity aborts the run; there is no rollback.

use crate::config::SimulationConfig;
use crate::diagnostics::FieldDiagnostics;
use crate::error::SimulationError;
use crate::physics::grid::{Grid, TimeParams};
use crate::physics::integrators::{Integrator, IntegratorRegistry, Workspace};
use crate::physics::math::Scalar;
use crate::physics::stability::StabilityEstimate;
use crate::physics::state::State;
use crate::physics::stencil::LinearKdv;
use crate::render::{Renderer, Snapshot};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Where a simulation is in its lifecycle
///
/// A run with `Nt = 0` steps is `Complete` from construction and never reports
/// `Initialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No step taken yet and at least one remains
    Initialized,
    Stepped(usize),
    Complete,
    /// A step produced a non-finite value; no further steps are possible
    Aborted(usize),
}

/// Outcome of [`Simulation::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub integrator: &'static str,
    pub steps: usize,
    pub final_time: Scalar,
    pub initial_diagnostics: FieldDiagnostics,
    pub final_diagnostics: FieldDiagnostics,
    pub elapsed: Duration,
}

pub struct Simulation {
    grid: Grid,
    time: TimeParams,
    state: State,
    integrator: Box<dyn Integrator>,
    operator: LinearKdv,
    workspace: Workspace,
    steps_taken: usize,
    initial: FieldDiagnostics,
    fault: Option<(usize, Scalar)>,
}

impl Simulation {
    /// # Errors
    ///
    /// - [`SimulationError::LengthMismatch`] when `state` was not sampled on `grid`
    /// - [`SimulationError::InvalidInitialState`] when `state` holds NaN or infinity
    pub fn new(
        grid: Grid,
        time: TimeParams,
        state: State,
        integrator: Box<dyn Integrator>,
    ) -> Result<Self, SimulationError> {
        if state.len() != grid.len() {
            return Err(SimulationError::LengthMismatch {
                expected: grid.len(),
                actual: state.len(),
            });
        }

        if let Some((index, value)) = state.first_non_finite() {
            return Err(SimulationError::InvalidInitialState(format!(
                "value {value} at index {index} is not finite"
            )));
        }

        let estimate = StabilityEstimate::new(integrator.as_ref(), &grid, &time);
        if estimate.is_worrying() {
            warn!(
                "{} with dt = {} and dx = {} may grow perturbations by up to 1e{:.0} over {} steps (dt/dx³ = {:.3e})",
                integrator.name(),
                time.dt(),
                grid.dx(),
                estimate.growth_log10,
                time.steps(),
                estimate.courant_number
            );
        } else {
            debug!(
                "stability estimate: dt/dx³ = {:.3e}, max gain per step {:.9}",
                estimate.courant_number, estimate.max_gain
            );
        }

        let initial = FieldDiagnostics::measure(&grid, state.values());

        Ok(Self {
            operator: LinearKdv::new(&grid),
            grid,
            time,
            state,
            integrator,
            workspace: Workspace::new(),
            steps_taken: 0,
            initial,
            fault: None,
        })
    }

    /// Builds grid, time parameters, initial state and integrator from `config`.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let grid = Grid::new(config.grid.length, config.grid.points)?;
        let time = TimeParams::new(config.time.total_time, config.time.dt)?;
        let integrator = IntegratorRegistry::default()
            .create(&config.integrator.integrator_type)
            .map_err(SimulationError::UnknownIntegrator)?;
        config
            .initial
            .validate()
            .map_err(SimulationError::InvalidInitialState)?;
        let state = config.initial.sample(&grid);

        info!(
            "{} points over L = {}, dt = {}, {} steps of {} from a {} profile",
            grid.len(),
            grid.length(),
            time.dt(),
            time.steps(),
            integrator.name(),
            config.initial.name()
        );

        Self::new(grid, time, state, integrator)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn time(&self) -> &TimeParams {
        &self.time
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// `k · dt` after `k` steps
    pub fn current_time(&self) -> Scalar {
        self.steps_taken as Scalar * self.time.dt()
    }

    pub fn phase(&self) -> Phase {
        if self.fault.is_some() {
            Phase::Aborted(self.steps_taken)
        } else if self.steps_taken >= self.time.steps() {
            Phase::Complete
        } else if self.steps_taken == 0 {
            Phase::Initialized
        } else {
            Phase::Stepped(self.steps_taken)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == Phase::Complete
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.steps_taken,
            self.current_time(),
            self.state.values().to_vec(),
        )
    }

    pub fn diagnostics(&self) -> FieldDiagnostics {
        FieldDiagnostics::measure(&self.grid, self.state.values())
    }

    /// Takes one step and scans the result.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::Complete`] once all steps have been taken
    /// - [`SimulationError::NonFiniteState`] when the step produced NaN or
    ///   infinity, and on every call after that
    pub fn advance(&mut self) -> Result<Phase, SimulationError> {
        self.check_fault()?;

        if self.is_complete() {
            return Err(SimulationError::Complete {
                steps: self.time.steps(),
            });
        }

        self.integrator.step(
            self.state.values_mut(),
            &self.operator,
            self.time.dt(),
            &mut self.workspace,
        );
        self.steps_taken += 1;

        if let Some((index, value)) = self.state.first_non_finite() {
            warn!(
                "state became non-finite at index {index} after step {} of {}",
                self.steps_taken,
                self.time.steps()
            );
            self.fault = Some((index, value));
            return Err(SimulationError::NonFiniteState {
                step: self.steps_taken,
                index,
                value,
            });
        }

        Ok(self.phase())
    }

    /// Takes every remaining step.
    pub fn run(&mut self) -> Result<RunSummary, SimulationError> {
        let started = Instant::now();
        while !self.is_complete() {
            self.advance()?;
        }
        Ok(self.summary(started.elapsed()))
    }

    /// Takes every remaining step, handing `renderer` a snapshot of the current
    /// state, one every `every` steps, and one of the final state.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidGrid`] when `every` is zero, plus everything
    /// [`Simulation::advance`] and the renderer can return. An aborted run
    /// fails before the renderer sees any frame.
    pub fn run_with(
        &mut self,
        renderer: &mut dyn Renderer,
        every: usize,
    ) -> Result<RunSummary, SimulationError> {
        if every == 0 {
            return Err(SimulationError::InvalidGrid(
                "snapshot interval must be at least one step".to_string(),
            ));
        }
        self.check_fault()?;

        let started = Instant::now();
        self.emit(renderer)?;

        while !self.is_complete() {
            self.advance()?;
            if self.steps_taken % every == 0 || self.is_complete() {
                self.emit(renderer)?;
            }
        }

        renderer.finish()?;
        Ok(self.summary(started.elapsed()))
    }

    /// Repeats the error of the step that aborted the run.
    fn check_fault(&self) -> Result<(), SimulationError> {
        match self.fault {
            Some((index, value)) => Err(SimulationError::NonFiniteState {
                step: self.steps_taken,
                index,
                value,
            }),
            None => Ok(()),
        }
    }

    fn emit(&self, renderer: &mut dyn Renderer) -> Result<(), SimulationError> {
        let snapshot = self.snapshot();
        let diagnostics = self.diagnostics();
        debug!(
            "step {} t = {:.6}: mass {:.6e}, energy {:.6e}, max |u| {:.6}",
            snapshot.step(),
            snapshot.time(),
            diagnostics.mass,
            diagnostics.energy,
            diagnostics.max_abs
        );
        renderer.render(&self.grid, &snapshot)?;
        Ok(())
    }

    fn summary(&self, elapsed: Duration) -> RunSummary {
        RunSummary {
            integrator: self.integrator.name(),
            steps: self.steps_taken,
            final_time: self.current_time(),
            initial_diagnostics: self.initial,
            final_diagnostics: self.diagnostics(),
            elapsed,
        }
    }
}
