//! A simple trait to wrap SVD Computation.

use crate::svd::{dec, dec_with_params, SvdParams, SVD};
use crate::types::{RealScalar, Result};
use ndarray::{ArrayBase, Data, Ix2};

pub trait ComputeSVD {
    type A: RealScalar;

    /// Compute the SVD of a matrix with default parameters.
    fn compute_svd(&self) -> Result<SVD<Self::A>>;

    /// Compute the SVD of a matrix with explicit parameters.
    fn compute_svd_with_params(&self, params: SvdParams) -> Result<SVD<Self::A>>;
}

impl<A, S> ComputeSVD for ArrayBase<S, Ix2>
where
    A: RealScalar,
    S: Data<Elem = A>,
{
    type A = A;

    fn compute_svd(&self) -> Result<SVD<A>> {
        dec(self.view())
    }

    fn compute_svd_with_params(&self, params: SvdParams) -> Result<SVD<A>> {
        dec_with_params(self.view(), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svd::SVDTraits;
    use ndarray::array;

    #[test]
    fn test_compute_svd_on_views_and_owned_arrays() {
        let mat = array![[2.0_f64, 0.0], [0.0, -1.0]];

        let from_owned = mat.compute_svd().unwrap();
        let from_view = mat.view().compute_svd().unwrap();

        assert_eq!(from_owned.s, from_view.s);
        assert_eq!(from_owned.s, array![2.0, 1.0]);
        assert_eq!(from_owned.rank(), 2);
    }

    #[test]
    fn test_compute_svd_with_params() {
        let mat = array![[1.0_f32, 2.0], [3.0, 4.0]];

        let params = SvdParams { max_iterations: 0 };

        assert!(mat.compute_svd_with_params(params).is_err());
        assert!(mat.compute_svd_with_params(SvdParams::default()).is_ok());
    }
}
