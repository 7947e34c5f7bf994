//! Scalar helpers and relative error measures.

use crate::types::RealScalar;
use ndarray::{ArrayView1, ArrayView2};
use ndarray_linalg::Norm;
use num::traits::cast::cast;
use num::Float;

/// Euclidean norm of a sequence of values.
///
/// The norm is accumulated through repeated `hypot` calls so that no
/// intermediate square is formed.
pub(crate) fn hypot_norm<'a, A, I>(values: I) -> A
where
    A: RealScalar,
    I: IntoIterator<Item = &'a A>,
{
    values
        .into_iter()
        .fold(A::zero(), |acc, &item| Float::hypot(acc, item))
}

/// Convert a dimension into the scalar type.
pub(crate) fn from_usize<A: RealScalar>(value: usize) -> A {
    cast::<usize, A>(value).unwrap_or_else(A::infinity)
}

/// Convert a double precision parameter into the scalar type.
pub(crate) fn from_f64<A: RealScalar>(value: f64) -> A {
    cast::<f64, A>(value).unwrap_or_else(A::nan)
}

pub trait RelDiff {
    type A: RealScalar;

    /// Return the relative Frobenius norm difference of `first` and `second`.
    fn rel_diff_fro(first: ArrayView2<Self::A>, second: ArrayView2<Self::A>) -> Self::A;

    /// Return the relative l2 vector norm difference of `first` and `second`.
    fn rel_diff_l2(first: ArrayView1<Self::A>, second: ArrayView1<Self::A>) -> Self::A;
}

macro_rules! rel_diff_impl {
    ($scalar:ty) => {
        impl RelDiff for $scalar {
            type A = $scalar;
            fn rel_diff_fro(first: ArrayView2<Self::A>, second: ArrayView2<Self::A>) -> Self::A {
                let diff = first.to_owned() - &second;
                diff.norm_l2() / second.norm_l2()
            }

            fn rel_diff_l2(first: ArrayView1<Self::A>, second: ArrayView1<Self::A>) -> Self::A {
                let diff = first.to_owned() - &second;
                diff.norm_l2() / second.norm_l2()
            }
        }
    };
}

rel_diff_impl!(f32);
rel_diff_impl!(f64);

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_hypot_norm_does_not_overflow() {
        let values = [1E200_f64, 1E200, 1E200, 1E200];
        let norm = hypot_norm(values.iter());

        assert!(norm.is_finite());
        assert!(((norm / 2E200) - 1.0).abs() < 1E-14);
    }

    #[test]
    fn test_hypot_norm_of_empty_sequence_is_zero() {
        let values: [f64; 0] = [];
        assert_eq!(hypot_norm(values.iter()), 0.0);
    }

    #[test]
    fn test_rel_diff() {
        let first = array![[1.0, 0.0], [0.0, 1.0]];
        let second = array![[1.0, 0.0], [0.0, 2.0]];

        let expected = 1.0 / 5.0_f64.sqrt();
        assert!((f64::rel_diff_fro(first.view(), second.view()) - expected).abs() < 1E-15);
        assert!(
            (f64::rel_diff_l2(first.row(1), second.row(1)) - 0.5).abs() < 1E-15
        );
    }
}
