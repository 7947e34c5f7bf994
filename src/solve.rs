//! Pseudo-inverse and regularised least squares solvers built on the SVD.
//!
//! All solvers expand the right-hand side in the left singular vectors and
//! return $x = \sum_j f(s_j)(u_j^Tb)v_j$ for a filter function $f$:
//!
//! - truncated SVD: $f(s) = 1/s$ for $s > \text{tol}$ and $0$ otherwise,
//! - damped SVD: $f(s) = 1/(s + \sigma)$,
//! - Tikhonov regularisation: $f(s) = s/(s^2 + \alpha^2)$.

use crate::svd::{dec, SVDTraits, SVD};
use crate::types::{RealScalar, Result, RustySvdError};
use itertools::izip;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

/// Solvers and pseudo-inverse of a decomposed matrix.
pub trait SolveSVD {
    type A: RealScalar;

    /// Moore-Penrose pseudo-inverse $V\Sigma_r^{-1}U^T$ of the n x m shape.
    ///
    /// Singular values not larger than `tol` are treated as zero. For `None` or a
    /// non-positive `tol` the tolerance is [`SVDTraits::default_tolerance`].
    fn pseudo_inverse(&self, tol: Option<Self::A>) -> Array2<Self::A>;

    /// Minimum norm solution of $Ax=b$ over the singular values larger than `tol`.
    ///
    /// `tol` is resolved as in [`SolveSVD::pseudo_inverse`].
    fn solve_truncated(&self, b: ArrayView1<Self::A>, tol: Option<Self::A>) -> Result<Array1<Self::A>>;

    /// Solution of $Ax=b$ with every singular value shifted by the damping `sigma`.
    ///
    /// `sigma` is expected to be positive.
    fn solve_damped(&self, b: ArrayView1<Self::A>, sigma: Self::A) -> Result<Array1<Self::A>>;

    /// Tikhonov regularised solution minimising $\|Ax-b\|^2 + \alpha^2\|x\|^2$.
    fn solve_tikhonov(&self, b: ArrayView1<Self::A>, alpha: Self::A) -> Result<Array1<Self::A>>;
}

impl<A: RealScalar> SolveSVD for SVD<A> {
    type A = A;

    fn pseudo_inverse(&self, tol: Option<A>) -> Array2<A> {
        let tol = truncation_tolerance(self, tol);
        let k = self.s.len();

        let mut scaled_v = self.v.slice(s![.., ..k]).to_owned();
        Zip::from(scaled_v.axis_iter_mut(Axis(1)))
            .and(&self.s)
            .for_each(|mut col, &s_elem| {
                if s_elem > tol {
                    col.mapv_inplace(|item| item / s_elem);
                } else {
                    col.fill(A::zero());
                }
            });

        scaled_v.dot(&self.u.t())
    }

    fn solve_truncated(&self, b: ArrayView1<A>, tol: Option<A>) -> Result<Array1<A>> {
        let tol = truncation_tolerance(self, tol);
        filtered_solve(self, b, |s_elem| {
            if s_elem > tol {
                A::one() / s_elem
            } else {
                A::zero()
            }
        })
    }

    fn solve_damped(&self, b: ArrayView1<A>, sigma: A) -> Result<Array1<A>> {
        filtered_solve(self, b, |s_elem| A::one() / (s_elem + sigma))
    }

    fn solve_tikhonov(&self, b: ArrayView1<A>, alpha: A) -> Result<Array1<A>> {
        filtered_solve(self, b, |s_elem| s_elem / (s_elem * s_elem + alpha * alpha))
    }
}

fn truncation_tolerance<A: RealScalar>(svd: &SVD<A>, tol: Option<A>) -> A {
    tol.filter(|&item| item > A::zero())
        .unwrap_or_else(|| svd.default_tolerance())
}

fn filtered_solve<A, F>(svd: &SVD<A>, b: ArrayView1<A>, filter: F) -> Result<Array1<A>>
where
    A: RealScalar,
    F: Fn(A) -> A,
{
    let m = svd.u.nrows();
    if b.len() != m {
        return Err(RustySvdError::DimensionMismatch {
            expected: m,
            found: b.len(),
        });
    }

    let coeffs = svd.u.t().dot(&b);
    let weights: Array1<A> = izip!(coeffs.iter(), svd.s.iter())
        .map(|(&coeff, &s_elem)| coeff * filter(s_elem))
        .collect();

    Ok(svd.v.slice(s![.., ..weights.len()]).dot(&weights))
}

/// Pseudo-inverse of `arr`.
pub fn pinv<A: RealScalar>(arr: ArrayView2<A>, tol: Option<A>) -> Result<Array2<A>> {
    Ok(dec(arr)?.pseudo_inverse(tol))
}

/// Truncated SVD solution of the rank deficient system `arr x = b`.
pub fn tsvd<A: RealScalar>(arr: ArrayView2<A>, b: ArrayView1<A>, tol: Option<A>) -> Result<Array1<A>> {
    check_rhs(arr, b)?;
    dec(arr)?.solve_truncated(b, tol)
}

/// Damped SVD solution of the rank deficient system `arr x = b`.
pub fn dsvd<A: RealScalar>(arr: ArrayView2<A>, b: ArrayView1<A>, sigma: A) -> Result<Array1<A>> {
    check_rhs(arr, b)?;
    dec(arr)?.solve_damped(b, sigma)
}

/// Tikhonov regularised solution of the system `arr x = b`.
pub fn tikhonov<A: RealScalar>(arr: ArrayView2<A>, b: ArrayView1<A>, alpha: A) -> Result<Array1<A>> {
    check_rhs(arr, b)?;
    dec(arr)?.solve_tikhonov(b, alpha)
}

// Fail before paying for a decomposition.
fn check_rhs<A: RealScalar>(arr: ArrayView2<A>, b: ArrayView1<A>) -> Result<()> {
    if arr.nrows() == b.len() {
        Ok(())
    } else {
        Err(RustySvdError::DimensionMismatch {
            expected: arr.nrows(),
            found: b.len(),
        })
    }
}
