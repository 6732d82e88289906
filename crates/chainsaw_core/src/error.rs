use thiserror::Error;

/// Precondition violations reported by the checked stepping API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    /// A state or derivative does not match the stepper's scratch buffers.
    #[error("length mismatch: stepper buffers hold {expected} elements, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A resizable stepper was asked to step before `adjust_size` was called.
    #[error("scratch buffers are unsized; call adjust_size before stepping a state of {len} elements")]
    UnsizedScratch { len: usize },
}
