//! Collect all traits and other exports here.

pub use crate::compute_svd::ComputeSVD;
pub use crate::helpers::RelDiff;
pub use crate::random_matrix::RandomMatrix;
pub use crate::solve::SolveSVD;
pub use crate::svd::{SVDTraits, SvdParams, SVD};
pub use crate::svd_compression::CompressSVD;
pub use crate::types::{RealScalar, Result, RustySvdError};
pub use crate::CompressionType;
