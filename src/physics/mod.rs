pub mod analytic;
pub mod grid;
pub mod integrators;
pub mod math;
pub mod profiles;
pub mod stability;
pub mod state;
pub mod stencil;

pub use grid::{Grid, TimeParams};
pub use state::State;
pub use stencil::{LinearKdv, ThirdDerivative, third_derivative};
