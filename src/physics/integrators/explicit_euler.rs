//! Explicit Euler integration method (forward Euler)
//!
//! The default time advance for the linear KdV system. It is first order in
//! `dt` and, applied to a purely dispersive operator, amplifies every Fourier
//! mode a little on each step. Runs stay usable only while `dt` is small
//! against `dx³`.

use super::{Integrator, TendencyField, Workspace};
use crate::physics::math::Scalar;

/// Explicit Euler integrator (forward Euler method)
///
/// # Algorithm
///
/// ```text
/// k      = F(u(t))            evaluated on the whole pre-step state
/// u(t+dt) = u(t) + dt * k
/// ```
///
/// With `F(u) = -D3[u]` this is exactly `u_i <- u_i - dt * D3[u]_i`. The
/// tendency lands in a separate buffer before any value of `u` changes.
///
/// # Stability
///
/// For a mode with tendency eigenvalue `i ω` the per-step gain is
/// `sqrt(1 + (ω dt)²) > 1`. No step size is strictly stable on the imaginary
/// axis; growth over a run stays negligible while `steps * (ω_max dt)²` is
/// small, which for the third-derivative stencil means `dt ≲ C dx³`.
///
/// # Mathematical Properties
///
/// - **Order of accuracy**: O(dt) global error
/// - **Tendency evaluations**: 1 per timestep
/// - **Stability**: never strictly stable for imaginary eigenvalues
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(
        &self,
        state: &mut [Scalar],
        field: &dyn TendencyField,
        dt: Scalar,
        workspace: &mut Workspace,
    ) {
        let (stages, _) = workspace.buffers(1, state.len());
        let tendency = &mut stages[0];

        field.evaluate(state, tendency);

        for (value, rate) in state.iter_mut().zip(tendency.iter()) {
            *value += dt * rate;
        }
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn imaginary_axis_gain(&self, z: Scalar) -> Scalar {
        libm::sqrt(1.0 + z * z)
    }

    fn name(&self) -> &'static str {
        "explicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["euler", "forward_euler"]
    }
}
