//! Classical fourth-order Runge-Kutta

use super::{Integrator, TendencyField, Workspace};
use crate::physics::math::Scalar;

/// Classical RK4
///
/// ```text
/// k1 = F(u)
/// k2 = F(u + dt/2 * k1)
/// k3 = F(u + dt/2 * k2)
/// k4 = F(u + dt   * k3)
/// u  = u + dt/6 * (k1 + 2 k2 + 2 k3 + k4)
/// ```
///
/// Its stability region contains the imaginary axis segment `|z| ≤ 2√2`, so
/// unlike the Euler-type methods it damps dispersive modes slightly as long
/// as `dt · max|σ| ≤ 2√2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaFourthOrder;

impl RungeKuttaFourthOrder {
    fn stage_input(trial: &mut [Scalar], state: &[Scalar], slope: &[Scalar], h: Scalar) {
        for ((t, u), k) in trial.iter_mut().zip(state).zip(slope) {
            *t = u + h * k;
        }
    }
}

impl Integrator for RungeKuttaFourthOrder {
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
        let (stages, trial) = workspace.buffers(4, state.len());
        let [k1, k2, k3, k4] = stages else {
            unreachable!("workspace returns exactly the requested stage count")
        };
        let half_dt = 0.5 * dt;

        field.evaluate(state, k1);

        Self::stage_input(trial, state, k1, half_dt);
        field.evaluate(trial, k2);

        Self::stage_input(trial, state, k2, half_dt);
        field.evaluate(trial, k3);

        Self::stage_input(trial, state, k3, dt);
        field.evaluate(trial, k4);

        let sixth_dt = dt / 6.0;
        for (i, u) in state.iter_mut().enumerate() {
            *u += sixth_dt * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
        }
    }

    fn convergence_order(&self) -> usize {
        4
    }

    fn imaginary_axis_gain(&self, z: Scalar) -> Scalar {
        let z2 = z * z;
        let re = 1.0 - 0.5 * z2 + z2 * z2 / 24.0;
        let im = z - z2 * z / 6.0;
        libm::hypot(re, im)
    }

    fn name(&self) -> &'static str {
        "rk4"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["runge_kutta_4", "classical_rk4"]
    }
}
