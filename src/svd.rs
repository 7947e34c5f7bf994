//! Singular value decomposition of dense real matrices.
//!
//! The singular value decomposition of $A\in\mathbb{R}^{m\times n}$ is computed as
//! $A = U\Sigma V^T$, where $U\in\mathbb{R}^{m\times k}$ has orthonormal columns,
//! $V\in\mathbb{R}^{n\times n}$ is orthogonal and $\Sigma = \text{diag}(s)$ with
//! $s_1\geq s_2\geq\dots\geq s_k\geq 0$. Here $k=\min\{m, n\}$.
//!
//! The computation follows Golub, Kahan and Reinsch. The matrix is first reduced to
//! upper bidiagonal form by Householder reflections, then the bidiagonal matrix is
//! diagonalised by implicitly shifted QR sweeps with Wilkinson shifts.
//!
//! Numerically singular input is never an error. It simply results in zero or tiny
//! singular values. The only failure is the iteration limit in [`SvdParams`].

use crate::accumulate::{accumulate_left, accumulate_right};
use crate::bidiag::{bidiagonalize, Bidiagonal};
use crate::deflation::QrIteration;
use crate::helpers::from_usize;
use crate::types::{RealScalar, Result};
use itertools::Itertools;
use log::debug;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

/// Default number of QR sweeps allowed for a single singular value.
pub const DEFAULT_MAX_ITERATIONS: usize = 75;

/// Parameters of the iterative phase of the SVD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SvdParams {
    /// Maximum number of QR sweeps spent on one singular value before the
    /// decomposition gives up with [`crate::types::RustySvdError::NoConvergence`].
    pub max_iterations: usize,
}

impl Default for SvdParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

pub struct SVD<A: RealScalar> {
    /// The m x min(m, n) matrix of left singular vectors
    pub u: Array2<A>,
    /// The singular values in descending order
    pub s: Array1<A>,
    /// The n x n matrix of right singular vectors
    pub v: Array2<A>,
}

/// Compute the SVD of `arr` with default parameters.
pub fn dec<A: RealScalar>(arr: ArrayView2<A>) -> Result<SVD<A>> {
    dec_with_params(arr, SvdParams::default())
}

/// Compute the SVD of `arr`.
///
/// `arr` is copied. For an empty matrix an empty decomposition with
/// $V = I_n$ is returned.
pub fn dec_with_params<A: RealScalar>(arr: ArrayView2<A>, params: SvdParams) -> Result<SVD<A>> {
    let (m, n) = arr.dim();
    debug!("Computing SVD of a {}x{} matrix", m, n);

    if m == 0 || n == 0 {
        return Ok(SVD {
            u: Array2::<A>::zeros((m, 0)),
            s: Array1::<A>::zeros(0),
            v: Array2::<A>::eye(n),
        });
    }

    let Bidiagonal {
        s,
        e,
        mut u,
        mut v,
        nct,
        nrt,
    } = bidiagonalize(arr);

    accumulate_left(&mut u, s.view(), nct);
    accumulate_right(&mut v, e.view(), nrt);

    let (mut s, u, v) = QrIteration::new(s, e, u, v).run(params.max_iterations)?;

    // For m < n the bidiagonal matrix carries one structural zero at the end.
    let k = m.min(n);
    if s.len() > k {
        s = s.slice_move(s![..k]);
    }

    debug_assert!(is_sorted_descending(s.view()));

    Ok(SVD { u, s, v })
}

pub(crate) fn is_sorted_descending<A: RealScalar>(s: ArrayView1<A>) -> bool {
    s.iter().tuple_windows().all(|(first, second)| first >= second)
        && s.iter().all(|&item| item >= A::zero())
}

/// Traits for the SVD
pub trait SVDTraits {
    type A: RealScalar;

    /// Number of rows of the decomposed matrix
    fn nrows(&self) -> usize {
        self.get_u().nrows()
    }

    /// Number of columns of the decomposed matrix
    fn ncols(&self) -> usize {
        self.get_v().nrows()
    }

    /// The largest singular value, which is the spectral norm of the matrix.
    fn norm2(&self) -> Self::A {
        self.get_s()
            .first()
            .copied()
            .unwrap_or_else(<Self::A as num::Zero>::zero)
    }

    /// The 2-norm condition number `s[0] / s[last]`.
    ///
    /// This is not an error for singular matrices. A zero smallest singular value
    /// gives infinity, a zero matrix or an empty decomposition gives NaN.
    fn cond(&self) -> Self::A {
        let s = self.get_s();
        match (s.first(), s.last()) {
            (Some(&first), Some(&last)) => first / last,
            _ => <Self::A as num::Float>::nan(),
        }
    }

    /// The default rank tolerance `max(m, n) * s[0] * eps`.
    fn default_tolerance(&self) -> Self::A {
        let dim = self.nrows().max(self.ncols());
        from_usize::<Self::A>(dim) * self.norm2() * <Self::A as num::Float>::epsilon()
    }

    /// Number of singular values strictly larger than `tol`.
    fn rank_with_tolerance(&self, tol: Self::A) -> usize {
        self.get_s().iter().filter(|&&item| item > tol).count()
    }

    /// Effective numerical rank with respect to [`SVDTraits::default_tolerance`].
    fn rank(&self) -> usize {
        self.rank_with_tolerance(self.default_tolerance())
    }

    /// Diagonal matrix of the singular values
    fn s_mat(&self) -> Array2<Self::A> {
        Array2::from_diag(&self.get_s())
    }

    /// Convert the SVD to a matrix
    fn to_mat(&self) -> Array2<Self::A> {
        let k = self.get_s().len();
        let mut scaled_u = self.get_u().slice(s![.., ..k]).to_owned();

        Zip::from(scaled_u.axis_iter_mut(Axis(1)))
            .and(self.get_s())
            .for_each(|mut col, &s_elem| col.mapv_inplace(|item| item * s_elem));

        scaled_u.dot(&self.get_v().slice(s![.., ..k]).t())
    }

    /// Return the U matrix
    fn get_u(&self) -> ArrayView2<Self::A>;

    /// Return the singular values
    fn get_s(&self) -> ArrayView1<Self::A>;

    /// Return the V matrix
    fn get_v(&self) -> ArrayView2<Self::A>;

    /// Compute the SVD from a given array
    fn compute_from(arr: ArrayView2<Self::A>) -> Result<SVD<Self::A>>;

    /// Compute the SVD from a given array with explicit parameters
    fn compute_from_with_params(arr: ArrayView2<Self::A>, params: SvdParams) -> Result<SVD<Self::A>>;
}

impl<A: RealScalar> SVDTraits for SVD<A> {
    type A = A;

    fn get_u(&self) -> ArrayView2<A> {
        self.u.view()
    }

    fn get_s(&self) -> ArrayView1<A> {
        self.s.view()
    }

    fn get_v(&self) -> ArrayView2<A> {
        self.v.view()
    }

    fn compute_from(arr: ArrayView2<A>) -> Result<SVD<A>> {
        dec(arr)
    }

    fn compute_from_with_params(arr: ArrayView2<A>, params: SvdParams) -> Result<SVD<A>> {
        dec_with_params(arr, params)
    }
}
