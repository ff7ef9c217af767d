//! # Utility Functions for Digest Computation
//!
//! This module provides the digest helpers shared by the hashing worker and the CLI.
//!
//! ## Submodules
//!
//! - **digest**: SHA-2 digest computation and the selectable `DigestAlgorithm`.

mod digest;

pub use digest::{compute_file_digest, DigestAlgorithm};
