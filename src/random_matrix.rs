//! Generation of random matrices for tests, benchmarks and demos

use crate::svd::dec;
use crate::types::{RealScalar, Result};
use ndarray::{s, Array, Array2};
use num::traits::cast::cast;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub trait RandomMatrix
where
    Self: RealScalar,
{
    /// Generate a random Gaussian matrix.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `rng`: The random number generator to use.
    fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Self>;

    /// Generate a random matrix with orthogonal rows or columns.
    ///
    /// This function creates a normally distributed (m, n) random matrix,
    /// orthogonalizes it and returns the resulting orthogonal matrix.
    ///
    /// If m > n then the returned matrix has orthogonal columns. If n > m
    /// the returned matrix has orthogonalized rows.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `rng`: The random number generator to use.
    fn random_orthogonal_matrix<R: Rng>(
        dimension: (usize, usize),
        rng: &mut R,
    ) -> Result<Array2<Self>> {
        let (m, n) = if dimension.1 > dimension.0 {
            (dimension.1, dimension.0)
        } else {
            dimension
        };

        // The left singular vectors of a tall Gaussian matrix are orthonormal.
        let u = dec(Self::random_gaussian((m, n), rng).view())?
            .u
            .slice_move(s![.., ..n]);

        if dimension.1 > dimension.0 {
            Ok(u.reversed_axes())
        } else {
            Ok(u)
        }
    }

    /// Generate a random approximate low-rank matrix.
    ///
    /// This function generates a random approximate low-rank matrix
    /// with singular values logarithmically distributed between
    /// `sigma_max` and `sigma_min`.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `sigma_max`: Maximum singular value.
    /// * `sigma_min`: Minimum singular value.
    /// * `rng`: The random number generator to use.
    fn random_approximate_low_rank_matrix<R: Rng>(
        dimension: (usize, usize),
        sigma_max: f64,
        sigma_min: f64,
        rng: &mut R,
    ) -> Result<Array2<Self>> {
        assert!(
            sigma_min < sigma_max,
            "`sigma_min` must be smaller than `sigma_max`"
        );
        assert!(sigma_min > 0.0, "`sigma_min` must be positive.");

        let min_dim = std::cmp::min(dimension.0, dimension.1);

        let u = Self::random_orthogonal_matrix((dimension.0, min_dim), rng)?;
        let vt = Self::random_orthogonal_matrix((min_dim, dimension.1), rng)?;
        let singvals = Array::geomspace(sigma_max, sigma_min, min_dim)
            .unwrap_or_else(|| Array::zeros(min_dim))
            .mapv(|item| cast::<f64, Self>(item).unwrap_or_else(Self::zero));
        let sigma = Array2::from_diag(&singvals);
        Ok(u.dot(&sigma.dot(&vt)))
    }
}

macro_rules! random_matrix_impl {
    ($scalar:ty) => {
        impl RandomMatrix for $scalar {
            fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<$scalar> {
                Array2::from_shape_simple_fn(dimension, || StandardNormal.sample(&mut *rng))
            }
        }
    };
}

random_matrix_impl!(f32);
random_matrix_impl!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn orthogonality_error(mat: &Array2<f64>) -> f64 {
        let gram = mat.t().dot(mat);
        let eye = Array2::<f64>::eye(mat.ncols());
        (gram - eye).iter().fold(0.0, |acc, item| acc.max(item.abs()))
    }

    #[test]
    fn test_random_gaussian_shape() {
        let mut rng = rand::thread_rng();
        let mat = f32::random_gaussian((5, 3), &mut rng);

        assert_eq!(mat.dim(), (5, 3));
        assert!(mat.iter().all(|item| item.is_finite()));
    }

    #[test]
    fn test_random_orthogonal_matrix() {
        let mut rng = rand::thread_rng();

        let columns = f64::random_orthogonal_matrix((20, 7), &mut rng).unwrap();
        let rows = f64::random_orthogonal_matrix((7, 20), &mut rng).unwrap();

        assert_eq!(columns.dim(), (20, 7));
        assert_eq!(rows.dim(), (7, 20));
        assert!(orthogonality_error(&columns) < 1E-13);
        assert!(orthogonality_error(&rows.t().to_owned()) < 1E-13);
    }
}
