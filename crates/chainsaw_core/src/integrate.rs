//! Fixed-step driving loops built on top of the steppers.
//!
//! Nothing here adapts the step size: every loop advances with a constant
//! `dt` and hands each new state to an observer.

use crate::{
    solvers::{Euler, ImprovedEuler},
    state::StateVector,
    traits::{Scalar, Stepper, System},
};
use anyhow::{anyhow, bail, Result};
use num_traits::{Float, FromPrimitive, One, Zero};
use serde::{Deserialize, Serialize};

/// Selects a stepper at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepperKind {
    Euler,
    ImprovedEuler,
}

impl StepperKind {
    pub fn build<S: StateVector>(self) -> AnyStepper<S> {
        match self {
            StepperKind::Euler => AnyStepper::Euler(Euler::new()),
            StepperKind::ImprovedEuler => AnyStepper::ImprovedEuler(ImprovedEuler::new()),
        }
    }
}

/// One of the built-in steppers, chosen through [`StepperKind`].
#[derive(Debug)]
pub enum AnyStepper<S: StateVector> {
    Euler(Euler<S>),
    ImprovedEuler(ImprovedEuler<S>),
}

impl<S: StateVector> Stepper<S> for AnyStepper<S> {
    fn order_step(&self) -> u16 {
        match self {
            AnyStepper::Euler(s) => s.order_step(),
            AnyStepper::ImprovedEuler(s) => s.order_step(),
        }
    }

    fn adjust_size(&mut self, reference: &S) {
        match self {
            AnyStepper::Euler(s) => s.adjust_size(reference),
            AnyStepper::ImprovedEuler(s) => s.adjust_size(reference),
        }
    }

    fn scratch_len(&self) -> usize {
        match self {
            AnyStepper::Euler(s) => s.scratch_len(),
            AnyStepper::ImprovedEuler(s) => s.scratch_len(),
        }
    }

    fn do_step<Sys: System<S>>(
        &mut self,
        system: &mut Sys,
        state: &mut S,
        t: S::Value,
        dt: S::Value,
    ) {
        match self {
            AnyStepper::Euler(s) => s.do_step(system, state, t, dt),
            AnyStepper::ImprovedEuler(s) => s.do_step(system, state, t, dt),
        }
    }
}

/// Settings for [`integrate_with`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IntegrationSettings {
    pub stepper: StepperKind,
    pub dt: f64,
    pub max_steps: usize,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            stepper: StepperKind::ImprovedEuler,
            dt: 0.01,
            max_steps: 1_000_000,
        }
    }
}

impl IntegrationSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            bail!("Step size dt must be positive.");
        }
        if self.max_steps == 0 {
            bail!("max_steps must be greater than zero.");
        }
        Ok(())
    }
}

/// Sampled states collected by an observer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trajectory<T> {
    pub times: Vec<T>,
    pub states: Vec<Vec<T>>,
}

impl<T: Scalar> Trajectory<T> {
    pub fn new() -> Self {
        Self {
            times: Vec::new(),
            states: Vec::new(),
        }
    }

    pub fn record<S: StateVector<Value = T>>(&mut self, state: &S, t: T) {
        self.times.push(t);
        self.states.push(state.as_slice().to_vec());
    }
}

/// Takes `steps` steps of size `dt` from `t0` and returns the final time.
///
/// The observer sees the initial state and then every stepped state. Times
/// are computed as `t0 + k * dt` so they do not accumulate rounding.
pub fn integrate_n_steps<S, St, Sys, Obs>(
    stepper: &mut St,
    system: &mut Sys,
    state: &mut S,
    t0: S::Value,
    dt: S::Value,
    steps: usize,
    mut observer: Obs,
) -> Result<S::Value>
where
    S: StateVector,
    St: Stepper<S>,
    Sys: System<S>,
    Obs: FnMut(&S, S::Value),
{
    if state.is_empty() {
        bail!("Initial state must have positive dimension.");
    }
    if !dt.is_finite() || dt <= S::Value::zero() {
        bail!("Step size dt must be positive.");
    }

    stepper.adjust_size(state);
    observer(state, t0);

    let mut t = t0;
    let mut k = S::Value::zero();
    for _ in 0..steps {
        stepper.try_do_step(system, state, t, dt)?;
        k = k + S::Value::one();
        t = t0 + dt * k;
        observer(state, t);
    }
    Ok(t)
}

/// Integrates from `t0` to `t1` with the constant step `dt` and returns the
/// number of steps taken.
///
/// Only whole steps are taken: when `t1 - t0` is not a multiple of `dt` the
/// integration stops at the last step that does not pass `t1`.
#[allow(clippy::too_many_arguments)]
pub fn integrate_const<S, St, Sys, Obs>(
    stepper: &mut St,
    system: &mut Sys,
    state: &mut S,
    t0: S::Value,
    t1: S::Value,
    dt: S::Value,
    max_steps: usize,
    observer: Obs,
) -> Result<usize>
where
    S: StateVector,
    St: Stepper<S>,
    Sys: System<S>,
    Obs: FnMut(&S, S::Value),
{
    if !dt.is_finite() || dt <= S::Value::zero() {
        bail!("Step size dt must be positive.");
    }
    if t1 < t0 {
        bail!("End time must not precede start time.");
    }

    let steps = step_count(t1 - t0, dt)?;
    if steps > max_steps {
        bail!(
            "Integration needs {} steps, exceeding max_steps = {}.",
            steps,
            max_steps
        );
    }

    integrate_n_steps(stepper, system, state, t0, dt, steps, observer)?;
    Ok(steps)
}

/// Builds the stepper named by `settings.stepper` and runs [`integrate_const`].
pub fn integrate_with<S, Sys, Obs>(
    system: &mut Sys,
    state: &mut S,
    t0: S::Value,
    t1: S::Value,
    settings: &IntegrationSettings,
    observer: Obs,
) -> Result<usize>
where
    S: StateVector,
    Sys: System<S>,
    Obs: FnMut(&S, S::Value),
{
    settings.validate()?;
    let dt = S::Value::from_f64(settings.dt)
        .ok_or_else(|| anyhow!("Step size {} is not representable.", settings.dt))?;
    let mut stepper = settings.stepper.build::<S>();
    integrate_const(
        &mut stepper,
        system,
        state,
        t0,
        t1,
        dt,
        settings.max_steps,
        observer,
    )
}

fn step_count<T: Scalar>(span: T, dt: T) -> Result<usize> {
    // Absorb rounding in span / dt, e.g. 1.0 / 0.1 = 9.999999999999998.
    let slack = T::from_f64(1e-9).unwrap_or_else(T::epsilon);
    let ratio = span / dt;
    let whole = (ratio + ratio.max(T::one()) * slack).floor();
    whole
        .to_usize()
        .ok_or_else(|| anyhow!("Step count {:?} is out of range.", whole))
}
