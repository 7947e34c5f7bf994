//! Definition of SVD based compression routines

use crate::helpers::from_f64;
use crate::svd::SVD;
use crate::types::{RealScalar, Result, RustySvdError};
use crate::CompressionType;
use log::debug;
use ndarray::s;

pub trait CompressSVD {
    type A: RealScalar;

    /// Truncate the decomposition to its leading singular triplets.
    ///
    /// The returned `u` is m x k, `s` has length k and `v` is n x k.
    fn compress(self, compression_type: CompressionType) -> Result<SVD<Self::A>>;
}

impl<A: RealScalar> CompressSVD for SVD<A> {
    type A = A;

    fn compress(self, compression_type: CompressionType) -> Result<SVD<A>> {
        match compression_type {
            CompressionType::ADAPTIVE(tol) => compress_svd_tolerance(self, tol),
            CompressionType::RANK(rank) => Ok(compress_svd_rank(self, rank)),
        }
    }
}

fn compress_svd_rank<A: RealScalar>(svd: SVD<A>, mut max_rank: usize) -> SVD<A> {
    let SVD { u, s, v } = svd;

    if max_rank > s.len() {
        max_rank = s.len()
    }

    debug!("Compressing SVD to rank {}", max_rank);

    let u = u.slice_move(s![.., 0..max_rank]);
    let s = s.slice_move(s![0..max_rank]);
    let v = v.slice_move(s![.., 0..max_rank]);

    SVD { u, s, v }
}

fn compress_svd_tolerance<A: RealScalar>(svd: SVD<A>, tol: f64) -> Result<SVD<A>> {
    if !(0.0..1.0).contains(&tol) {
        return Err(RustySvdError::InvalidTolerance(tol));
    }

    let tol = from_f64::<A>(tol);
    let pos = svd
        .s
        .first()
        .and_then(|&first| svd.s.iter().position(|&item| item / first < tol));

    match pos {
        Some(index) => Ok(compress_svd_rank(svd, index)),
        None => Err(RustySvdError::CompressionError),
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use ndarray::array;

    #[test]
    fn test_svd_compression_by_rank() {
        let m = 50;
        let n = 30;
        let rank: usize = 10;

        let sigma_max = 1.0;
        let sigma_min = 1E-10;
        let mut rng = rand::thread_rng();
        let mat = f64::random_approximate_low_rank_matrix((m, n), sigma_max, sigma_min, &mut rng)
            .unwrap();

        let svd = mat
            .compute_svd()
            .unwrap()
            .compress(CompressionType::RANK(rank))
            .unwrap();

        // Compare with original matrix

        assert_eq!(svd.u.dim(), (m, rank));
        assert_eq!(svd.s.len(), rank);
        assert_eq!(svd.v.dim(), (n, rank));
        assert!(f64::rel_diff_fro(svd.to_mat().view(), mat.view()) < 1E-3);
    }

    #[test]
    fn test_svd_compression_rank_is_capped() {
        let mat = array![[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]];

        let svd = mat
            .compute_svd()
            .unwrap()
            .compress(CompressionType::RANK(10))
            .unwrap();

        assert_eq!(svd.s.len(), 2);
        assert!(f64::rel_diff_fro(svd.to_mat().view(), mat.view()) < 1E-14);
    }

    #[test]
    fn test_svd_compression_by_tol() {
        let m = 50;
        let n = 30;
        let tol = 1E-5;

        let sigma_max = 1.0;
        let sigma_min = 1E-10;
        let mut rng = rand::thread_rng();
        let mat = f64::random_approximate_low_rank_matrix((m, n), sigma_max, sigma_min, &mut rng)
            .unwrap();

        let svd = mat
            .compute_svd()
            .unwrap()
            .compress(CompressionType::ADAPTIVE(tol))
            .unwrap();

        assert_eq!(svd.u.nrows(), m);
        assert_eq!(svd.v.nrows(), n);
        assert!(svd.s.iter().all(|&item| item / svd.s[0] >= tol));
        let rel_diff = f64::rel_diff_fro(svd.to_mat().view(), mat.view());
        assert!(rel_diff < 10.0 * tol);
    }

    #[test]
    fn test_svd_compression_invalid_tolerance() {
        let mat = array![[1.0_f64, 0.0], [0.0, 1.0]];

        let result = mat
            .compute_svd()
            .unwrap()
            .compress(CompressionType::ADAPTIVE(1.5));

        assert!(matches!(result, Err(RustySvdError::InvalidTolerance(_))));
    }

    #[test]
    fn test_svd_compression_tolerance_not_reached() {
        let mat = array![[1.0_f64, 0.0], [0.0, 1.0]];

        let result = mat
            .compute_svd()
            .unwrap()
            .compress(CompressionType::ADAPTIVE(0.5));

        assert!(matches!(result, Err(RustySvdError::CompressionError)));
    }
}
