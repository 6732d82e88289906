use crate::error::StepError;
use crate::state::StateVector;
use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Element type of a state vector. The current time and the step size use
/// the same type, so any `Float` that can be built from an `f64` qualifies.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Represents a continuous-time dynamical system over plain slices.
pub trait DynamicalSystem<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the vector field.
    /// x: current state
    /// t: current time
    /// out: buffer to write dx/dt into
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// The right-hand side consumed by a stepper: fills `dxdt` with the
/// derivative of `x` at time `t`, leaving `x` untouched.
///
/// Any `FnMut(&S, &mut S, T)` closure is a system.
pub trait System<S: StateVector> {
    fn call(&mut self, x: &S, dxdt: &mut S, t: S::Value);

    /// State dimension the system expects, when it declares one.
    fn dimension(&self) -> Option<usize> {
        None
    }
}

impl<S, F> System<S> for F
where
    S: StateVector,
    F: FnMut(&S, &mut S, S::Value),
{
    fn call(&mut self, x: &S, dxdt: &mut S, t: S::Value) {
        self(x, dxdt, t)
    }
}

/// Adapts a [`DynamicalSystem`] so it can drive any stepper, whatever the
/// state container.
pub struct Flow<'a, D: ?Sized>(pub &'a D);

impl<'a, S, D> System<S> for Flow<'a, D>
where
    S: StateVector,
    D: DynamicalSystem<S::Value> + ?Sized,
{
    fn call(&mut self, x: &S, dxdt: &mut S, t: S::Value) {
        debug_assert_eq!(
            <D as DynamicalSystem<S::Value>>::dimension(self.0),
            x.len(),
            "state does not match system dimension"
        );
        self.0.apply(t, x.as_slice(), dxdt.as_mut_slice());
    }

    fn dimension(&self) -> Option<usize> {
        Some(<D as DynamicalSystem<S::Value>>::dimension(self.0))
    }
}

/// A fixed-step explicit stepper advancing a state of type `S` in place.
pub trait Stepper<S: StateVector> {
    /// Fixed-step methods only.
    const IS_ADAPTIVE: bool = false;

    /// Order indicator reported by the stepper.
    fn order_step(&self) -> u16;

    /// Sizes the scratch buffers after `reference`, when `S` can be resized.
    fn adjust_size(&mut self, reference: &S);

    /// Element count of the scratch buffers.
    fn scratch_len(&self) -> usize;

    /// Performs one step of size `dt` starting at time `t`.
    ///
    /// `state.len()` must equal [`Stepper::scratch_len`]. Debug builds panic on
    /// a mismatch; use [`Stepper::try_do_step`] to get an error instead.
    fn do_step<Sys: System<S>>(
        &mut self,
        system: &mut Sys,
        state: &mut S,
        t: S::Value,
        dt: S::Value,
    );

    /// Checked variant of [`Stepper::do_step`]. Also rejects a state whose
    /// length differs from the system's declared dimension. Nothing is
    /// mutated on error.
    fn try_do_step<Sys: System<S>>(
        &mut self,
        system: &mut Sys,
        state: &mut S,
        t: S::Value,
        dt: S::Value,
    ) -> Result<(), StepError> {
        if let Some(expected) = <Sys as System<S>>::dimension(system) {
            if expected != state.len() {
                return Err(StepError::LengthMismatch {
                    expected,
                    found: state.len(),
                });
            }
        }
        check_scratch::<S>(self.scratch_len(), state.len())?;
        self.do_step(system, state, t, dt);
        Ok(())
    }
}

/// Validates a caller's vector length against a stepper's scratch length.
pub(crate) fn check_scratch<S: StateVector>(scratch: usize, found: usize) -> Result<(), StepError> {
    if scratch == found {
        return Ok(());
    }
    if S::HAS_RESIZE && scratch == 0 {
        return Err(StepError::UnsizedScratch { len: found });
    }
    Err(StepError::LengthMismatch {
        expected: scratch,
        found,
    })
}
