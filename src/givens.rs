//! Plane rotations.

use crate::types::RealScalar;
use ndarray::{s, ArrayViewMut2, Zip};
use num::Float;

/// A Givens rotation `[c s; -s c]` that maps the pair `(f, g)` onto `(r, 0)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GivensRotation<A: RealScalar> {
    c: A,
    s: A,
    r: A,
}

impl<A: RealScalar> GivensRotation<A> {
    /// Construct the rotation annihilating `g` against `f`.
    ///
    /// `r` is computed with `hypot`. For `f = g = 0` the identity rotation is returned.
    pub(crate) fn new(f: A, g: A) -> Self {
        let r = Float::hypot(f, g);
        if r == A::zero() {
            Self {
                c: A::one(),
                s: A::zero(),
                r,
            }
        } else {
            Self {
                c: f / r,
                s: g / r,
                r,
            }
        }
    }

    pub(crate) fn c(&self) -> A {
        self.c
    }

    pub(crate) fn s(&self) -> A {
        self.s
    }

    pub(crate) fn r(&self) -> A {
        self.r
    }

    /// Replace columns `first` and `second` of `mat` by
    /// `c * first + s * second` and `-s * first + c * second`.
    pub(crate) fn rotate_columns(&self, mut mat: ArrayViewMut2<A>, first: usize, second: usize) {
        let (c, s) = (self.c, self.s);
        let (first_col, second_col) = mat.multi_slice_mut((s![.., first], s![.., second]));

        Zip::from(first_col)
            .and(second_col)
            .for_each(|x, y| {
                let t = c * *x + s * *y;
                *y = c * *y - s * *x;
                *x = t;
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rotation_annihilates_second_component() {
        let rot = GivensRotation::new(3.0_f64, 4.0);

        assert!((rot.r() - 5.0).abs() < 1E-15);
        assert!((rot.c() * 3.0 + rot.s() * 4.0 - 5.0).abs() < 1E-15);
        assert!((-rot.s() * 3.0 + rot.c() * 4.0).abs() < 1E-15);
    }

    #[test]
    fn test_zero_pair_gives_identity() {
        let rot = GivensRotation::new(0.0_f64, 0.0);

        assert_eq!(rot.c(), 1.0);
        assert_eq!(rot.s(), 0.0);
        assert_eq!(rot.r(), 0.0);
    }

    #[test]
    fn test_rotate_columns() {
        let mut mat = array![[3.0_f64, 1.0, 4.0], [0.0, 2.0, 0.0]];
        let rot = GivensRotation::new(3.0, 4.0);

        rot.rotate_columns(mat.view_mut(), 0, 2);

        assert!((mat[[0, 0]] - 5.0).abs() < 1E-15);
        assert!(mat[[0, 2]].abs() < 1E-15);
        assert_eq!(mat[[0, 1]], 1.0);
        assert_eq!(mat[[1, 1]], 2.0);
    }
}
