//! Elementwise operations shared by the steppers.
//!
//! Every routine walks its ranges in lockstep and assumes they have the same
//! length. The ranges are zipped, so elements past the end of the shortest
//! one are left untouched.
//!
//! The grouping of each formula is fixed (`scale_a * a + scale_b * b` is
//! formed before it is added to the destination) so results are reproducible
//! bit for bit.

use crate::traits::Scalar;

/// `x[i] = x[i] + dx[i] * scale`
pub fn increment<'x, 'd, T, X, D>(x: X, dx: D, scale: T)
where
    T: Scalar,
    X: IntoIterator<Item = &'x mut T>,
    D: IntoIterator<Item = &'d T>,
{
    for (xi, &dxi) in x.into_iter().zip(dx) {
        *xi = *xi + dxi * scale;
    }
}

/// `dest[i] = scale_a * a[i] + scale_b * b[i]`
///
/// The previous contents of `dest` are never read.
pub fn scale_two_sum<'d, 'a, 'b, T, Dst, A, B>(dest: Dst, scale_a: T, a: A, scale_b: T, b: B)
where
    T: Scalar,
    Dst: IntoIterator<Item = &'d mut T>,
    A: IntoIterator<Item = &'a T>,
    B: IntoIterator<Item = &'b T>,
{
    for ((di, &ai), &bi) in dest.into_iter().zip(a).zip(b) {
        *di = scale_a * ai + scale_b * bi;
    }
}

/// `dest[i] = dest[i] + (scale_a * a[i] + scale_b * b[i])`
pub fn scale_two_sum_accumulate<'d, 'a, 'b, T, Dst, A, B>(
    dest: Dst,
    scale_a: T,
    a: A,
    scale_b: T,
    b: B,
) where
    T: Scalar,
    Dst: IntoIterator<Item = &'d mut T>,
    A: IntoIterator<Item = &'a T>,
    B: IntoIterator<Item = &'b T>,
{
    for ((di, &ai), &bi) in dest.into_iter().zip(a).zip(b) {
        *di = *di + (scale_a * ai + scale_b * bi);
    }
}

#[cfg(test)]
mod tests {
    use super::{increment, scale_two_sum, scale_two_sum_accumulate};

    #[test]
    fn increment_adds_scaled_delta() {
        let mut x = vec![1.0, -2.0, 0.5];
        let dx = [4.0, 1.0, -1.0];
        increment(&mut x, &dx, 0.25);
        assert_eq!(x, vec![2.0, -1.75, 0.25]);
    }

    #[test]
    fn scale_two_sum_ignores_previous_destination() {
        let mut dest = [f64::NAN; 2];
        scale_two_sum(&mut dest, 2.0, &[1.0, 3.0], -1.0, &[0.5, 4.0]);
        assert_eq!(dest, [1.5, 2.0]);
    }

    #[test]
    fn accumulate_sums_products_before_adding() {
        // 1e16 + (1 + 1) differs from (1e16 + 1) + 1 in f64.
        let mut dest = [1e16_f64];
        scale_two_sum_accumulate(&mut dest, 1.0, &[1.0], 1.0, &[1.0]);
        assert_eq!(dest[0], 1e16 + 2.0);

        let mut naive = 1e16_f64;
        naive += 1.0;
        naive += 1.0;
        assert_ne!(dest[0], naive);
    }

    #[test]
    fn single_element_ranges_need_no_special_case() {
        let mut x = [3.0_f32];
        increment(x.iter_mut(), [2.0_f32].iter(), 0.5);
        assert_eq!(x[0], 4.0);
    }

    #[test]
    fn empty_ranges_are_a_no_op() {
        let mut x: Vec<f64> = Vec::new();
        increment(&mut x, &Vec::new(), 1.0);
        assert!(x.is_empty());
    }
}
