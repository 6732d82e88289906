//! The `chainsaw_core` crate provides fixed-step explicit integrators for
//! ordinary differential equations. It is generic over the scalar type (any
//! `num_traits::Float`) and over the state container.
//!
//! Key components:
//! - **Traits**: `Scalar`, `System` (the right-hand side), `Stepper`, and the
//!   slice-based `DynamicalSystem` with its `Flow` adapter.
//! - **State**: `StateVector`, with compile-time detection of resizable
//!   containers (`Vec`, `DVector`) versus fixed ones (`[T; N]`, `SVector`).
//! - **Algebra**: elementwise scaled sums used by every update formula.
//! - **Solvers**: `Euler` and `ImprovedEuler` (Heun).
//! - **Integrate**: constant-step driving loops, settings and trajectories.
pub mod algebra;
pub mod error;
pub mod integrate;
pub mod solvers;
pub mod state;
pub mod traits;

pub use error::StepError;
pub use solvers::{Euler, ImprovedEuler};
pub use state::{has_resize, StateVector};
pub use traits::{DynamicalSystem, Flow, Scalar, Stepper, System};
