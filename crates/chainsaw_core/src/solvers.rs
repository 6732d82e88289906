use crate::algebra;
use crate::error::StepError;
use crate::state::StateVector;
use crate::traits::{Scalar, Stepper, System};

fn half<T: Scalar>() -> T {
    T::one() / (T::one() + T::one())
}

/// Explicit (forward) Euler: `x(t + dt) = x(t) + dt * f(x, t)`.
///
/// Holds a single scratch buffer for the derivative. Not `Clone`: a second
/// stepper has to be built explicitly.
#[derive(Debug)]
pub struct Euler<S: StateVector> {
    dxdt: S,
}

impl<S: StateVector> Euler<S> {
    pub fn new() -> Self {
        Self { dxdt: S::zeroed() }
    }

    /// Builds a stepper whose scratch buffer already matches `reference`.
    pub fn for_state(reference: &S) -> Self {
        let mut stepper = Self::new();
        stepper.adjust_size(reference);
        stepper
    }

    /// Steps with a derivative the caller already evaluated at the start of
    /// the interval: `state += dxdt * dt`.
    pub fn do_step_with_derivative(&mut self, state: &mut S, dxdt: &S, dt: S::Value) {
        debug_assert_eq!(state.len(), dxdt.len(), "derivative length mismatch");
        algebra::increment(state.as_mut_slice(), dxdt.as_slice(), dt);
    }

    /// Checked variant of [`Euler::do_step_with_derivative`].
    pub fn try_do_step_with_derivative(
        &mut self,
        state: &mut S,
        dxdt: &S,
        dt: S::Value,
    ) -> Result<(), StepError> {
        if dxdt.len() != state.len() {
            return Err(StepError::LengthMismatch {
                expected: state.len(),
                found: dxdt.len(),
            });
        }
        self.do_step_with_derivative(state, dxdt, dt);
        Ok(())
    }
}

impl<S: StateVector> Default for Euler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateVector> Stepper<S> for Euler<S> {
    fn order_step(&self) -> u16 {
        1
    }

    fn adjust_size(&mut self, reference: &S) {
        if S::HAS_RESIZE {
            self.dxdt.resize(reference.len());
        }
    }

    fn scratch_len(&self) -> usize {
        self.dxdt.len()
    }

    fn do_step<Sys: System<S>>(
        &mut self,
        system: &mut Sys,
        state: &mut S,
        t: S::Value,
        dt: S::Value,
    ) {
        debug_assert_eq!(state.len(), self.scratch_len(), "call adjust_size first");
        system.call(state, &mut self.dxdt, t);
        algebra::increment(state.as_mut_slice(), self.dxdt.as_slice(), dt);
    }
}

/// Heun's method, also known as Improved Euler or the explicit trapezoidal
/// rule.
///
/// An Euler predictor `x_pred = x + dt * f(x, t)` is followed by a corrector
/// averaging the slopes at both ends of the interval:
///
/// ```text
/// x(t + dt) = x(t) + dt/2 * (f(x, t) + f(x_pred, t + dt))
/// ```
///
/// The method is second order ([`ImprovedEuler::METHOD_ORDER`]), but
/// [`Stepper::order_step`] reports 1 to stay compatible with callers of the
/// original stepper API.
#[derive(Debug)]
pub struct ImprovedEuler<S: StateVector> {
    dxdt1: S,
    dxdt2: S,
    x_pred: S,
    steps: u64,
}

impl<S: StateVector> ImprovedEuler<S> {
    /// Formal order of accuracy of Heun's method.
    pub const METHOD_ORDER: u16 = 2;

    pub fn new() -> Self {
        Self {
            dxdt1: S::zeroed(),
            dxdt2: S::zeroed(),
            x_pred: S::zeroed(),
            steps: 0,
        }
    }

    /// Builds a stepper whose scratch buffers already match `reference`.
    pub fn for_state(reference: &S) -> Self {
        let mut stepper = Self::new();
        stepper.adjust_size(reference);
        stepper
    }

    /// Number of steps completed since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl<S: StateVector> Default for ImprovedEuler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateVector> Stepper<S> for ImprovedEuler<S> {
    fn order_step(&self) -> u16 {
        1
    }

    fn adjust_size(&mut self, reference: &S) {
        if S::HAS_RESIZE {
            let len = reference.len();
            self.dxdt1.resize(len);
            self.dxdt2.resize(len);
            self.x_pred.resize(len);
        }
    }

    fn scratch_len(&self) -> usize {
        self.x_pred.len()
    }

    fn do_step<Sys: System<S>>(
        &mut self,
        system: &mut Sys,
        state: &mut S,
        t: S::Value,
        dt: S::Value,
    ) {
        debug_assert_eq!(state.len(), self.scratch_len(), "call adjust_size first");

        // dxdt1 = f(x, t)
        system.call(state, &mut self.dxdt1, t);

        // x_pred = x + dt * dxdt1
        algebra::scale_two_sum(
            self.x_pred.as_mut_slice(),
            num_traits::one(),
            state.as_slice(),
            dt,
            self.dxdt1.as_slice(),
        );

        // dxdt2 = f(x_pred, t + dt)
        system.call(&self.x_pred, &mut self.dxdt2, t + dt);

        // x = x + dt/2 * dxdt1 + dt/2 * dxdt2
        let half_dt = dt * half();
        algebra::scale_two_sum_accumulate(
            state.as_mut_slice(),
            half_dt,
            self.dxdt1.as_slice(),
            half_dt,
            self.dxdt2.as_slice(),
        );

        self.steps += 1;
    }
}
