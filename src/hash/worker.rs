use super::types::HashResult;
use crate::utils::{compute_file_digest, DigestAlgorithm};
use log::{debug, warn};
use std::fs;

/// Hashes the files assigned to this rank, in order.
///
/// Every path yields exactly one result at the same position. A file that cannot
/// be read becomes [`HashResult::Unreadable`] and the loop moves on; nothing is
/// retried.
///
/// # Arguments
///
/// * `paths` - Paths assigned to this rank, possibly empty.
/// * `algorithm` - Digest to compute.
///
/// # Returns
///
/// One `HashResult` per input path, in input order.
///
/// # Examples
///
/// ```rust
/// use scatter_digest::hash::{hash_files, HashResult};
/// use scatter_digest::utils::DigestAlgorithm;
///
/// let results = hash_files(&["/definitely/not/here"], DigestAlgorithm::Sha512);
/// assert_eq!(results, vec![HashResult::Unreadable]);
/// ```
pub fn hash_files<S: AsRef<str>>(paths: &[S], algorithm: DigestAlgorithm) -> Vec<HashResult> {
    paths
        .iter()
        .map(|path| hash_file(path.as_ref(), algorithm))
        .collect()
}

/// Reads a whole file and hashes its bytes.
pub fn hash_file(path: &str, algorithm: DigestAlgorithm) -> HashResult {
    match fs::read(path) {
        Ok(bytes) => {
            let digest = compute_file_digest(algorithm, &bytes);
            debug!("Hashed {} ({} byte(s)): {}", path, bytes.len(), digest);
            HashResult::Digest(digest)
        }
        Err(e) => {
            warn!("Failed to read file {}: {}", path, e);
            HashResult::Unreadable
        }
    }
}
