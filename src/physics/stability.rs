//! Von Neumann growth estimate for a run
//!
//! The stencil maps every discrete Fourier mode `θ_m = 2π m / N` to an
//! imaginary tendency eigenvalue `-i σ(θ_m)`. One step of an explicit
//! integrator multiplies that mode by `|R(i dt σ)|`, so the worst mode's gain
//! raised to the step count bounds how much any perturbation can grow.

use super::grid::{Grid, TimeParams};
use super::integrators::Integrator;
use super::math::{Scalar, TAU};
use super::stencil::ThirdDerivative;

/// Predicted growth above which a run is reported as likely unstable,
/// as a power of ten
pub const GROWTH_WARNING_LOG10: Scalar = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityEstimate {
    /// `dt / dx³`
    pub courant_number: Scalar,
    /// Largest per-step gain over the grid's Fourier modes
    pub max_gain: Scalar,
    /// `log10(max_gain^steps)`
    pub growth_log10: Scalar,
}

impl StabilityEstimate {
    pub fn new(integrator: &dyn Integrator, grid: &Grid, time: &TimeParams) -> Self {
        let dx = grid.dx();
        let dt = time.dt();

        let max_gain = (0..=grid.len() / 2)
            .map(|m| {
                let theta = TAU * m as Scalar / grid.len() as Scalar;
                integrator.imaginary_axis_gain(dt * ThirdDerivative::symbol(theta, dx).abs())
            })
            .fold(0.0, Scalar::max);

        Self {
            courant_number: time.courant_number(dx),
            max_gain,
            growth_log10: time.steps() as Scalar * libm::log10(max_gain),
        }
    }

    pub fn is_worrying(&self) -> bool {
        self.growth_log10 > GROWTH_WARNING_LOG10
    }
}
