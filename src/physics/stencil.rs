//! Centred finite-difference third derivative on a periodic grid
//!
//! ```text
//! D3[u]_i = ( u[i+2] - 2 u[i+1] + 2 u[i-1] - u[i-2] ) / (2 dx^3)
//! ```
//!
//! Indices wrap modulo N. The stencil is antisymmetric about the centre point,
//! its weights sum to zero, and its truncation error is O(dx²).
//!
//! With this index order the stencil approximates `+∂³u/∂x³`: `x³` maps to 6.

use super::grid::Grid;
use super::integrators::TendencyField;
use super::math::{Scalar, wrap_index};

/// Writes the periodic third-derivative approximation of `u` into `out`.
///
/// Every output is computed from `u` alone; `out` is never read, so the result
/// does not depend on evaluation order.
///
/// # Panics
///
/// If `u` and `out` differ in length or hold fewer than [`Grid::MIN_POINTS`]
/// values.
pub fn third_derivative(u: &[Scalar], dx: Scalar, out: &mut [Scalar]) {
    let n = u.len();
    assert_eq!(n, out.len(), "derivative buffer does not match state length");
    assert!(
        n >= Grid::MIN_POINTS,
        "stencil needs at least {} points, got {n}",
        Grid::MIN_POINTS
    );

    let scale = 1.0 / (2.0 * dx * dx * dx);

    for (i, derivative) in out.iter_mut().enumerate() {
        let at = |offset: isize| u[wrap_index(i as isize + offset, n)];
        *derivative = (at(2) - 2.0 * at(1) + 2.0 * at(-1) - at(-2)) * scale;
    }
}

/// Spectral properties of the third-derivative stencil
///
/// Applied to the Fourier mode `exp(i j θ)` the stencil returns
/// `i · symbol(θ) · exp(i j θ)`, against `-i k³` for the exact operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThirdDerivative;

impl ThirdDerivative {
    /// Imaginary part of the stencil's Fourier symbol at `θ = k·dx`
    pub fn symbol(theta: Scalar, dx: Scalar) -> Scalar {
        (libm::sin(2.0 * theta) - 2.0 * libm::sin(theta)) / (dx * dx * dx)
    }

    /// Largest `|symbol(θ)|` over all θ, reached at `θ = 2π/3`
    pub fn max_symbol(dx: Scalar) -> Scalar {
        1.5 * libm::sqrt(3.0) / (dx * dx * dx)
    }
}

/// Right-hand side of `∂t u = -∂³x u`
#[derive(Debug, Clone, Copy)]
pub struct LinearKdv {
    dx: Scalar,
}

impl LinearKdv {
    pub fn new(grid: &Grid) -> Self {
        Self { dx: grid.dx() }
    }

    pub fn dx(&self) -> Scalar {
        self.dx
    }
}

impl TendencyField for LinearKdv {
    fn evaluate(&self, state: &[Scalar], out: &mut [Scalar]) {
        third_derivative(state, self.dx, out);
        for value in out.iter_mut() {
            *value = -*value;
        }
    }
}
