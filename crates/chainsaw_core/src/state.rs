//! State containers accepted by the steppers.
//!
//! Some containers can be resized to an arbitrary element count (`Vec`,
//! `DVector`), others have their length fixed by the type (`[T; N]`,
//! `SVector`). [`StateVector::HAS_RESIZE`] reports which is which at compile
//! time, so steppers can size their scratch buffers only when it means
//! something to do so.

use crate::traits::Scalar;
use nalgebra::{DVector, SVector};

/// An ordered, contiguous sequence of scalars that a stepper can advance.
pub trait StateVector: Sized {
    type Value: Scalar;

    /// Whether [`StateVector::resize`] can change the element count.
    const HAS_RESIZE: bool;

    /// The default-initialized container used for scratch buffers.
    fn zeroed() -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_slice(&self) -> &[Self::Value];

    fn as_mut_slice(&mut self) -> &mut [Self::Value];

    /// Resizes to `len` elements, filling new slots with zero.
    /// A no-op for fixed-size containers.
    fn resize(&mut self, len: usize);
}

/// Compile-time query: does `S` support resizing?
pub const fn has_resize<S: StateVector>() -> bool {
    S::HAS_RESIZE
}

impl<T: Scalar> StateVector for Vec<T> {
    type Value = T;
    const HAS_RESIZE: bool = true;

    fn zeroed() -> Self {
        Vec::new()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    fn resize(&mut self, len: usize) {
        Vec::resize(self, len, T::zero());
    }
}

impl<T: Scalar, const N: usize> StateVector for [T; N] {
    type Value = T;
    const HAS_RESIZE: bool = false;

    fn zeroed() -> Self {
        [T::zero(); N]
    }

    fn len(&self) -> usize {
        N
    }

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    fn resize(&mut self, _len: usize) {}
}

impl<T: Scalar> StateVector for DVector<T> {
    type Value = T;
    const HAS_RESIZE: bool = true;

    fn zeroed() -> Self {
        DVector::zeros(0)
    }

    fn len(&self) -> usize {
        self.nrows()
    }

    fn as_slice(&self) -> &[T] {
        nalgebra::Matrix::as_slice(self)
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        nalgebra::Matrix::as_mut_slice(self)
    }

    fn resize(&mut self, len: usize) {
        self.resize_vertically_mut(len, T::zero());
    }
}

impl<T: Scalar, const N: usize> StateVector for SVector<T, N> {
    type Value = T;
    const HAS_RESIZE: bool = false;

    fn zeroed() -> Self {
        SVector::zeros()
    }

    fn len(&self) -> usize {
        N
    }

    fn as_slice(&self) -> &[T] {
        nalgebra::Matrix::as_slice(self)
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        nalgebra::Matrix::as_mut_slice(self)
    }

    fn resize(&mut self, _len: usize) {}
}

#[cfg(test)]
mod tests {
    use super::{has_resize, StateVector};
    use nalgebra::{DVector, SVector};

    #[test]
    fn resize_capability_matches_container_kind() {
        assert!(has_resize::<Vec<f64>>());
        assert!(has_resize::<DVector<f32>>());
        assert!(!has_resize::<[f64; 3]>());
        assert!(!has_resize::<SVector<f64, 2>>());
    }

    #[test]
    fn zeroed_containers_have_natural_length() {
        assert_eq!(<Vec<f64> as StateVector>::zeroed().len(), 0);
        assert_eq!(<DVector<f64> as StateVector>::zeroed().len(), 0);
        assert_eq!(<[f64; 4] as StateVector>::zeroed(), [0.0; 4]);
        assert_eq!(<SVector<f64, 3> as StateVector>::zeroed().len(), 3);
    }

    #[test]
    fn resize_grows_dynamic_and_ignores_fixed() {
        let mut v: Vec<f64> = vec![1.0];
        StateVector::resize(&mut v, 3);
        assert_eq!(v, vec![1.0, 0.0, 0.0]);

        let mut d = DVector::from_vec(vec![2.0, 3.0]);
        StateVector::resize(&mut d, 1);
        assert_eq!(StateVector::as_slice(&d), &[2.0]);

        let mut a = [5.0_f64; 2];
        StateVector::resize(&mut a, 7);
        assert_eq!(StateVector::len(&a), 2);
    }
}
