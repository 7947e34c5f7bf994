//! Implicit-shift QR iteration on the bidiagonal matrix.
//!
//! The iteration works on a trailing active block `s[..p]`. Every pass inspects the
//! block for negligible entries and performs exactly one [`Step`]. An entry `e[k]` is
//! negligible if $|e_k| \leq \epsilon (|s_k| + |s_{k+1}|)$, a diagonal entry `s[k]`
//! if it is below $\epsilon$ times the sum of its neighbouring superdiagonal entries.
//! Negligible entries are set to zero as they are found.
//!
//! [`Step::Converged`] shrinks `p` by one. The other steps zero a superdiagonal entry
//! or reduce it by a QR sweep, so `p` never grows and the loop ends when it reaches 0.
//! Every rotation applied to the bidiagonal matrix is also applied to the columns of
//! `u` (from the left) or `v` (from the right), keeping $A = U B V^T$ intact.

use crate::givens::GivensRotation;
use crate::types::{RealScalar, Result, RustySvdError};
use log::{debug, trace, warn};
use ndarray::{s, Array1, Array2, ArrayViewMut2, Zip};

/// The transition chosen for the current active block `lo..p`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// `s[p - 1]` is negligible. Chase `e[p - 2]` up the block, rotating `v`.
    Deflate { lo: usize },
    /// `s[zero]` is negligible inside the block. Chase `e[zero]` down to `p`,
    /// rotating `u`.
    Split { zero: usize },
    /// Nothing in `lo..p` is negligible. Perform one Wilkinson-shifted QR sweep.
    QrStep { lo: usize },
    /// `e[p - 2]` is negligible, so `s[p - 1]` is a singular value.
    Converged,
}

pub(crate) struct QrIteration<A: RealScalar> {
    s: Array1<A>,
    e: Array1<A>,
    u: Array2<A>,
    v: Array2<A>,
    /// Exclusive upper bound of the active block.
    p: usize,
    /// Index of the last entry of `s` taking part in the ordering.
    pp: usize,
    eps: A,
}

impl<A: RealScalar> QrIteration<A> {
    /// Set up the iteration for the bidiagonal matrix with diagonal `s` and
    /// superdiagonal `e`, and the explicit orthogonal factors `u` and `v`.
    pub(crate) fn new(s: Array1<A>, e: Array1<A>, u: Array2<A>, v: Array2<A>) -> Self {
        let p = s.len();
        debug_assert!(p > 0);
        debug_assert!(e.len() >= p);

        Self {
            s,
            e,
            u,
            v,
            p,
            pp: p - 1,
            eps: A::epsilon(),
        }
    }

    /// Upper bound of the still unconverged block.
    pub(crate) fn active(&self) -> usize {
        self.p
    }

    /// Iterate until all singular values have converged.
    ///
    /// At most `max_iterations` QR sweeps are spent on any single singular value.
    /// Returns the singular values in descending order with the rotated factors.
    pub(crate) fn run(mut self, max_iterations: usize) -> Result<(Array1<A>, Array2<A>, Array2<A>)> {
        let mut iterations = 0;
        let mut total = 0;

        while self.active() > 0 {
            let step = self.next_step();
            trace!("Active block of size {}: {:?}", self.p, step);

            match step {
                Step::QrStep { .. } => {
                    if iterations >= max_iterations {
                        warn!(
                            "SVD iteration limit of {} sweeps reached with {} singular values outstanding",
                            max_iterations, self.p
                        );
                        return Err(RustySvdError::NoConvergence {
                            iterations: total,
                            remaining: self.p,
                        });
                    }
                    iterations += 1;
                    total += 1;
                }
                Step::Converged => iterations = 0,
                _ => (),
            }

            self.apply(step);
        }

        debug!("SVD converged after {} QR sweeps", total);

        Ok((self.s, self.u, self.v))
    }

    /// Inspect the active block and decide on the next transition.
    pub(crate) fn next_step(&mut self) -> Step {
        let p = self.p;
        let eps = self.eps;

        // The active block starts after the last negligible superdiagonal entry.
        let mut lo = 0;
        for k in (0..p - 1).rev() {
            if self.e[k].abs() <= eps * (self.s[k].abs() + self.s[k + 1].abs()) {
                self.e[k] = A::zero();
                lo = k + 1;
                break;
            }
        }

        if lo == p - 1 {
            return Step::Converged;
        }

        for ks in (lo..p).rev() {
            let mut t = self.e[ks].abs();
            if ks != lo {
                t = t + self.e[ks - 1].abs();
            }

            if self.s[ks].abs() <= eps * t {
                self.s[ks] = A::zero();
                return if ks == p - 1 {
                    Step::Deflate { lo }
                } else {
                    Step::Split { zero: ks }
                };
            }
        }

        Step::QrStep { lo }
    }

    pub(crate) fn apply(&mut self, step: Step) {
        match step {
            Step::Deflate { lo } => self.deflate(lo),
            Step::Split { zero } => self.split(zero),
            Step::QrStep { lo } => self.qr_sweep(lo),
            Step::Converged => self.converge(),
        }
    }

    fn deflate(&mut self, lo: usize) {
        let p = self.p;
        let mut f = self.e[p - 2];
        self.e[p - 2] = A::zero();

        for j in (lo..p - 1).rev() {
            let rot = GivensRotation::new(self.s[j], f);
            self.s[j] = rot.r();

            if j != lo {
                f = -rot.s() * self.e[j - 1];
                self.e[j - 1] = rot.c() * self.e[j - 1];
            }

            rot.rotate_columns(self.v.view_mut(), j, p - 1);
        }
    }

    fn split(&mut self, zero: usize) {
        let mut f = self.e[zero];
        self.e[zero] = A::zero();

        for j in (zero + 1)..self.p {
            let rot = GivensRotation::new(self.s[j], f);
            self.s[j] = rot.r();
            f = -rot.s() * self.e[j];
            self.e[j] = rot.c() * self.e[j];

            rot.rotate_columns(self.u.view_mut(), j, zero);
        }
    }

    fn qr_sweep(&mut self, lo: usize) {
        let p = self.p;
        let (s, e) = (&mut self.s, &mut self.e);

        // Wilkinson shift from the trailing 2x2 block of B^T B, computed on scaled
        // quantities to avoid overflow.
        let scale = s[p - 1]
            .abs()
            .max(s[p - 2].abs())
            .max(e[p - 2].abs())
            .max(s[lo].abs())
            .max(e[lo].abs());
        let sp = s[p - 1] / scale;
        let spm1 = s[p - 2] / scale;
        let epm1 = e[p - 2] / scale;
        let sk = s[lo] / scale;
        let ek = e[lo] / scale;

        let two = A::one() + A::one();
        let b = ((spm1 + sp) * (spm1 - sp) + epm1 * epm1) / two;
        let c = (sp * epm1) * (sp * epm1);

        let mut shift = A::zero();
        if b != A::zero() || c != A::zero() {
            shift = (b * b + c).sqrt();
            if b < A::zero() {
                shift = -shift;
            }
            shift = c / (b + shift);
        }

        let mut f = (sk + sp) * (sk - sp) + shift;
        let mut g = sk * ek;

        // Chase the bulge down the block.
        for j in lo..(p - 1) {
            let rot = GivensRotation::new(f, g);
            if j != lo {
                e[j - 1] = rot.r();
            }
            f = rot.c() * s[j] + rot.s() * e[j];
            e[j] = rot.c() * e[j] - rot.s() * s[j];
            g = rot.s() * s[j + 1];
            s[j + 1] = rot.c() * s[j + 1];

            rot.rotate_columns(self.v.view_mut(), j, j + 1);

            let rot = GivensRotation::new(f, g);
            s[j] = rot.r();
            f = rot.c() * e[j] + rot.s() * s[j + 1];
            s[j + 1] = -rot.s() * e[j] + rot.c() * s[j + 1];
            g = rot.s() * e[j + 1];
            e[j + 1] = rot.c() * e[j + 1];

            rot.rotate_columns(self.u.view_mut(), j, j + 1);
        }

        e[p - 2] = f;
    }

    fn converge(&mut self) {
        let mut k = self.p - 1;

        if self.s[k] <= A::zero() {
            self.s[k] = if self.s[k] < A::zero() {
                -self.s[k]
            } else {
                A::zero()
            };
            self.v.column_mut(k).mapv_inplace(|item| -item);
        }

        // Bubble the new value into place behind the already converged ones.
        while k < self.pp {
            if self.s[k] >= self.s[k + 1] {
                break;
            }

            self.s.swap(k, k + 1);
            if k + 1 < self.v.ncols() {
                swap_columns(self.v.view_mut(), k, k + 1);
            }
            if k + 1 < self.u.ncols() {
                swap_columns(self.u.view_mut(), k, k + 1);
            }
            k += 1;
        }

        self.p -= 1;
    }
}

fn swap_columns<A: RealScalar>(mut mat: ArrayViewMut2<A>, first: usize, second: usize) {
    let (first_col, second_col) = mat.multi_slice_mut((s![.., first], s![.., second]));
    Zip::from(first_col)
        .and(second_col)
        .for_each(std::mem::swap);
}
