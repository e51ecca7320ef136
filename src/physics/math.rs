//! Scalar type and small numeric helpers shared by the physics modules

/// Scalar type for field values and grid quantities (f64 for precision)
pub type Scalar = f64;

pub const TAU: Scalar = core::f64::consts::TAU;

/// Maps a possibly negative or overflowing index onto `[0, len)`.
///
/// Used for the periodic boundary: index `-1` is `len - 1`, index `len` is `0`.
#[inline]
pub fn wrap_index(index: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    index.rem_euclid(len as isize) as usize
}

/// Hyperbolic secant, `1 / cosh(x)`
#[inline]
pub fn sech(x: Scalar) -> Scalar {
    1.0 / libm::cosh(x)
}
