//! Heun's method (improved Euler, explicit trapezoidal rule)

use super::{Integrator, TendencyField, Workspace};
use crate::physics::math::Scalar;

/// Heun's method
///
/// A second-order predictor-corrector that averages the slope at the start
/// of the step with the slope at the Euler-predicted end point.
///
/// ```text
/// k1     = F(u)
/// u_pred = u + dt * k1
/// k2     = F(u_pred)
/// u      = u + dt/2 * (k1 + k2)
/// ```
///
/// On the imaginary axis the per-step gain is `sqrt(1 + z⁴/4)`, so it grows
/// slower than forward Euler for small `z` but is still never strictly stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heun;

impl Integrator for Heun {
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
        let (stages, predicted) = workspace.buffers(2, state.len());
        let (first, rest) = stages.split_at_mut(1);
        let (k1, k2) = (&mut first[0], &mut rest[0]);

        field.evaluate(state, k1);

        for ((p, u), k) in predicted.iter_mut().zip(state.iter()).zip(k1.iter()) {
            *p = u + dt * k;
        }

        field.evaluate(predicted, k2);

        let half_dt = dt * 0.5;
        for ((u, a), b) in state.iter_mut().zip(k1.iter()).zip(k2.iter()) {
            *u += half_dt * (a + b);
        }
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn imaginary_axis_gain(&self, z: Scalar) -> Scalar {
        let z2 = z * z;
        libm::sqrt(1.0 + 0.25 * z2 * z2)
    }

    fn name(&self) -> &'static str {
        "heun"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["improved_euler"]
    }
}
