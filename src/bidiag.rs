//! Householder reduction of a dense matrix to upper bidiagonal form.
//!
//! For $A\in\mathbb{R}^{m\times n}$ the reduction computes orthogonal $U_0$, $V_0$ with
//! $A = U_0 B V_0^T$, where $B$ is upper bidiagonal with diagonal `s` and
//! superdiagonal `e`. Left reflectors are applied to the columns of a working copy of
//! $A$, right reflectors to its rows. The raw reflector vectors are kept in `u` and `v`;
//! [`crate::accumulate`] turns them into the explicit orthogonal factors.

use crate::helpers::hypot_norm;
use crate::types::RealScalar;
use ndarray::{s, Array1, Array2, ArrayView2};

pub(crate) struct Bidiagonal<A: RealScalar> {
    /// Diagonal of the bidiagonal matrix, length min(m + 1, n).
    pub(crate) s: Array1<A>,
    /// Superdiagonal, length n. Only the first min(m + 1, n) entries are meaningful.
    pub(crate) e: Array1<A>,
    /// m x min(m, n) storage of the left reflectors. Column k holds reflector k in rows k..m.
    pub(crate) u: Array2<A>,
    /// n x n storage of the right reflectors. Column k holds reflector k in rows k+1..n.
    pub(crate) v: Array2<A>,
    /// Number of left reflectors.
    pub(crate) nct: usize,
    /// Number of right reflectors.
    pub(crate) nrt: usize,
}

/// Reduce `mat` to upper bidiagonal form.
///
/// The input is copied and never modified. Requires `mat` to have at least one row
/// and one column.
pub(crate) fn bidiagonalize<A: RealScalar>(mat: ArrayView2<A>) -> Bidiagonal<A> {
    let (m, n) = mat.dim();
    debug_assert!(m > 0 && n > 0);

    let nu = m.min(n);
    let p = n.min(m + 1);

    let mut work_mat = mat.to_owned();
    let mut u = Array2::<A>::zeros((m, nu));
    let mut v = Array2::<A>::zeros((n, n));
    let mut s = Array1::<A>::zeros(p);
    let mut e = Array1::<A>::zeros(n);
    let mut work = Array1::<A>::zeros(m);

    let nct = (m - 1).min(n);
    let nrt = n.saturating_sub(2).min(m);

    for k in 0..nct.max(nrt) {
        if k < nct {
            s[k] = reduce_column(&mut work_mat, k);
        }

        for j in (k + 1)..n {
            if k < nct && s[k] != A::zero() {
                let (col_k, mut col_j) = work_mat.multi_slice_mut((s![k.., k], s![k.., j]));
                let t = -col_k.dot(&col_j) / col_k[0];
                col_j.scaled_add(t, &col_k);
            }
            // Seed the row transformation with the updated k-th row.
            e[j] = work_mat[[k, j]];
        }

        if k < nct {
            u.slice_mut(s![k.., k]).assign(&work_mat.slice(s![k.., k]));
        }

        if k < nrt {
            e[k] = reduce_row(&mut e, k);

            if k + 1 < m && e[k] != A::zero() {
                let mut work = work.slice_mut(s![k + 1..]);
                work.fill(A::zero());

                for j in (k + 1)..n {
                    work.scaled_add(e[j], &work_mat.slice(s![k + 1.., j]));
                }

                for j in (k + 1)..n {
                    let t = -e[j] / e[k + 1];
                    work_mat.slice_mut(s![k + 1.., j]).scaled_add(t, &work);
                }
            }

            v.slice_mut(s![k + 1.., k]).assign(&e.slice(s![k + 1..]));
        }
    }

    // Entries not produced by a reflector are read off the working copy.
    if nct < n {
        s[nct] = work_mat[[nct, nct]];
    }
    if m < p {
        s[p - 1] = A::zero();
    }
    if nrt + 1 < p {
        e[nrt] = work_mat[[nrt, p - 1]];
    }
    e[p - 1] = A::zero();

    Bidiagonal {
        s,
        e,
        u,
        v,
        nct,
        nrt,
    }
}

/// Turn column `k` of `mat` (rows k..m) into a Householder vector and return the
/// new diagonal entry. A zero column is left untouched.
fn reduce_column<A: RealScalar>(mat: &mut Array2<A>, k: usize) -> A {
    let mut norm = hypot_norm(mat.slice(s![k.., k]));

    if norm != A::zero() {
        if mat[[k, k]] < A::zero() {
            norm = -norm;
        }
        mat.slice_mut(s![k.., k]).mapv_inplace(|item| item / norm);
        mat[[k, k]] = mat[[k, k]] + A::one();
    }

    -norm
}

/// Turn `e[k+1..n]` into a Householder vector and return the new superdiagonal entry.
fn reduce_row<A: RealScalar>(e: &mut Array1<A>, k: usize) -> A {
    let mut norm = hypot_norm(e.slice(s![k + 1..]));

    if norm != A::zero() {
        if e[k + 1] < A::zero() {
            norm = -norm;
        }
        e.slice_mut(s![k + 1..]).mapv_inplace(|item| item / norm);
        e[k + 1] = e[k + 1] + A::one();
    }

    -norm
}
