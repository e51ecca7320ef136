//! Explicit time integrators for semi-discretized fields
//!
//! A spatial discretization turns the PDE into `du/dt = F(u)` for the vector
//! of grid values. Integrators advance that system by one fixed step using
//! only evaluations of `F` on complete buffers, so no stage ever sees a
//! partially updated state.

use crate::physics::math::Scalar;

pub mod explicit_euler;
pub mod heun;
pub mod registry;
pub mod runge_kutta;

pub use explicit_euler::ExplicitEuler;
pub use heun::Heun;
pub use registry::IntegratorRegistry;
pub use runge_kutta::RungeKuttaFourthOrder;

/// Right-hand side `F(u)` of the semi-discrete system
pub trait TendencyField {
    /// Writes `F(state)` into `out`; `out` has the same length as `state`.
    fn evaluate(&self, state: &[Scalar], out: &mut [Scalar]);
}

/// Scratch buffers reused across steps
///
/// Integrators ask for as many stage buffers as they need; the buffers keep
/// their allocation between calls.
#[derive(Debug, Default, Clone)]
pub struct Workspace {
    stages: Vec<Vec<Scalar>>,
    trial: Vec<Scalar>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `count` stage buffers and one trial-state buffer, each `len` long.
    pub fn buffers(&mut self, count: usize, len: usize) -> (&mut [Vec<Scalar>], &mut Vec<Scalar>) {
        if self.stages.len() < count {
            self.stages.resize_with(count, Vec::new);
        }
        for stage in &mut self.stages[..count] {
            stage.resize(len, 0.0);
        }
        self.trial.resize(len, 0.0);
        (&mut self.stages[..count], &mut self.trial)
    }
}

/// Fixed-step explicit integrator
pub trait Integrator: Send + Sync {
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Advance `state` by `dt` under `field`
    fn step(
        &self,
        state: &mut [Scalar],
        field: &dyn TendencyField,
        dt: Scalar,
        workspace: &mut Workspace,
    );

    /// Global order of accuracy in `dt`
    fn convergence_order(&self) -> usize;

    /// Gain `|R(i z)|` of one step applied to a mode whose tendency
    /// eigenvalue is purely imaginary, `λ dt = i z`.
    ///
    /// Dispersive operators only have imaginary eigenvalues, so this decides
    /// whether a mode grows or decays per step.
    fn imaginary_axis_gain(&self, z: Scalar) -> Scalar;

    fn name(&self) -> &'static str;

    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

impl Clone for Box<dyn Integrator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn Integrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integrator")
            .field("name", &self.name())
            .field("order", &self.convergence_order())
            .finish()
    }
}
