//! Back-multiplication of the stored Householder reflectors.
//!
//! Reflectors are applied in decreasing order to an identity-seeded factor, so that
//! each one only touches the trailing part of the matrix that is already built.

use crate::types::RealScalar;
use ndarray::{s, Array2, ArrayView1};

/// Form the left factor in place from the reflectors stored by the bidiagonalization.
///
/// `diag` is the bidiagonal diagonal. A zero entry marks a column for which no
/// reflector was generated.
pub(crate) fn accumulate_left<A: RealScalar>(u: &mut Array2<A>, diag: ArrayView1<A>, nct: usize) {
    let nu = u.ncols();

    for j in nct..nu {
        set_unit_column(u, j);
    }

    for k in (0..nct).rev() {
        if diag[k] != A::zero() {
            for j in (k + 1)..nu {
                let (col_k, mut col_j) = u.multi_slice_mut((s![k.., k], s![k.., j]));
                let t = -col_k.dot(&col_j) / col_k[0];
                col_j.scaled_add(t, &col_k);
            }

            let mut col = u.slice_mut(s![k.., k]);
            col.mapv_inplace(|item| -item);
            col[0] = A::one() + col[0];

            u.slice_mut(s![..k, k]).fill(A::zero());
        } else {
            set_unit_column(u, k);
        }
    }
}

/// Form the right factor in place from the reflectors stored by the bidiagonalization.
///
/// `offdiag` is the bidiagonal superdiagonal.
pub(crate) fn accumulate_right<A: RealScalar>(
    v: &mut Array2<A>,
    offdiag: ArrayView1<A>,
    nrt: usize,
) {
    let n = v.ncols();

    for k in (0..n).rev() {
        if k < nrt && offdiag[k] != A::zero() {
            for j in (k + 1)..n {
                let (col_k, mut col_j) = v.multi_slice_mut((s![k + 1.., k], s![k + 1.., j]));
                let t = -col_k.dot(&col_j) / col_k[0];
                col_j.scaled_add(t, &col_k);
            }
        }

        set_unit_column(v, k);
    }
}

fn set_unit_column<A: RealScalar>(mat: &mut Array2<A>, j: usize) {
    let mut col = mat.column_mut(j);
    col.fill(A::zero());
    col[j] = A::one();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidiag::bidiagonalize;
    use crate::random_matrix::RandomMatrix;

    fn orthogonality_error(mat: &Array2<f64>) -> f64 {
        let gram = mat.t().dot(mat);
        let eye = Array2::<f64>::eye(mat.ncols());
        (gram - eye).iter().fold(0.0, |acc, item| acc.max(item.abs()))
    }

    macro_rules! accumulate_tests {
        ($($name:ident: $dim:expr,)*) => {
            $(
            #[test]
            fn $name() {
                let mut rng = rand::thread_rng();
                let mat = f64::random_gaussian($dim, &mut rng);

                let mut bidiag = bidiagonalize(mat.view());
                accumulate_left(&mut bidiag.u, bidiag.s.view(), bidiag.nct);
                accumulate_right(&mut bidiag.v, bidiag.e.view(), bidiag.nrt);

                assert!(orthogonality_error(&bidiag.u) < 1E-13);
                assert!(orthogonality_error(&bidiag.v) < 1E-13);
            }
            )*
        };
    }

    accumulate_tests! {
        test_accumulate_thin: (40, 15),
        test_accumulate_square: (25, 25),
        test_accumulate_thick: (15, 40),
    }

    #[test]
    fn test_zero_matrix_gives_identity_factors() {
        let mat = Array2::<f64>::zeros((4, 3));

        let mut bidiag = bidiagonalize(mat.view());
        accumulate_left(&mut bidiag.u, bidiag.s.view(), bidiag.nct);
        accumulate_right(&mut bidiag.v, bidiag.e.view(), bidiag.nrt);

        let mut expected_u = Array2::<f64>::zeros((4, 3));
        for k in 0..3 {
            expected_u[[k, k]] = 1.0;
        }

        assert_eq!(bidiag.u, expected_u);
        assert_eq!(bidiag.v, Array2::<f64>::eye(3));
    }
}
