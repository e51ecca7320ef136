//! Integral measurements of the field

use crate::physics::grid::Grid;
use crate::physics::math::Scalar;

/// Conserved and monitored quantities of one state
///
/// The stencil's weights sum to zero, so `mass` is conserved up to rounding
/// by every integrator. `energy` is conserved by the exact equation but grows
/// under the Euler-type methods.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldDiagnostics {
    /// `Σ u_i dx`
    pub mass: Scalar,
    /// `½ Σ u_i² dx`
    pub energy: Scalar,
    /// `max |u_i|`
    pub max_abs: Scalar,
}

impl FieldDiagnostics {
    pub fn measure(grid: &Grid, values: &[Scalar]) -> Self {
        let dx = grid.dx();
        let (sum, sum_sq, max_abs) =
            values
                .iter()
                .fold((0.0, 0.0, 0.0_f64), |(sum, sum_sq, max_abs), &u| {
                    (sum + u, sum_sq + u * u, max_abs.max(u.abs()))
                });

        Self {
            mass: sum * dx,
            energy: 0.5 * sum_sq * dx,
            max_abs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_simple_field() {
        let grid = Grid::new(5.0, 5).unwrap();
        let diagnostics = FieldDiagnostics::measure(&grid, &[1.0, -2.0, 0.0, 3.0, 0.5]);
        assert_eq!(diagnostics.mass, 2.5);
        assert_eq!(diagnostics.energy, 0.5 * (1.0 + 4.0 + 9.0 + 0.25));
        assert_eq!(diagnostics.max_abs, 3.0);
    }
}
