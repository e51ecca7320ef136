//! Wavedrift library
//!
//! Finite-difference stepping of the linear KdV equation `u_t + u_xxx = 0`
//! on a periodic grid, exposed as a library so the binary, the integration
//! tests and the benches share one implementation.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod physics;
pub mod prelude;
pub mod render;
pub mod simulation;
