//! Decomposing, compressing and solving with the SVD.
//!
//! This demo computes the SVD of an approximately low-rank $m\times n$ matrix,
//! compresses it to a given tolerance and solves a rank deficient least squares problem.

use rusty_svd::prelude::*;
use rusty_svd::tsvd;

pub fn main() {
    // We initialize a random number generator.
    let mut rng = rand::thread_rng();

    // The dimension of the matrix.
    let dimension = (300, 120);

    // Generate a random matrix with singular values logarithmically
    // distributed between 1 and 1E-12.
    let mat = f64::random_approximate_low_rank_matrix(dimension, 1.0, 1E-12, &mut rng)
        .expect("Could not generate the matrix.");

    // Compute the full decomposition.
    let svd = mat.compute_svd().expect("SVD did not converge.");

    println!("Largest singular value: {:1.2E}", svd.norm2());
    println!("Condition number: {:1.2E}", svd.cond());
    println!("Numerical rank: {}", svd.rank());

    // Truncate the decomposition to a relative tolerance.
    let tol = 1E-6;
    let compressed = svd
        .compress(CompressionType::ADAPTIVE(tol))
        .expect("Could not compress the matrix.");

    let rel_diff = f64::rel_diff_fro(compressed.to_mat().view(), mat.view());
    println!(
        "Compressed to rank {} with relative difference {:1.2E}",
        compressed.s.len(),
        rel_diff
    );

    // Solve a least squares problem whose solution lies in the numerical range.
    let x = f64::random_gaussian((dimension.1, 1), &mut rng).column(0).to_owned();
    let b = mat.dot(&x);
    let x_approx = tsvd(mat.view(), b.view(), Some(1E-9)).expect("Could not solve the system.");

    let residual = f64::rel_diff_l2(mat.dot(&x_approx).view(), b.view());
    println!("Relative residual of the truncated SVD solution: {:1.2E}", residual);
}
