use clap::ValueEnum;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;

/// Cryptographic digest used to fingerprint file contents.
///
/// Both variants produce lowercase hexadecimal strings of a fixed width, two
/// characters per digest byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DigestAlgorithm {
    /// SHA-256, 64 hex characters.
    Sha256,
    /// SHA-512, 128 hex characters.
    #[default]
    Sha512,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
            DigestAlgorithm::Sha512 => write!(f, "sha512"),
        }
    }
}

/// Computes a digest for a file using its raw content.
///
/// The whole content is hashed in one pass and the result is hex-encoded.
///
/// # Arguments
///
/// * `algorithm` - Which SHA-2 variant to use.
/// * `raw_content` - The raw bytes of the file content.
///
/// # Returns
///
/// A lowercase hexadecimal string, 64 characters for SHA-256 and 128 for SHA-512.
pub fn compute_file_digest(algorithm: DigestAlgorithm, raw_content: &[u8]) -> String {
    match algorithm {
        DigestAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(raw_content);
            hex::encode(hasher.finalize())
        }
        DigestAlgorithm::Sha512 => {
            let mut hasher = Sha512::new();
            hasher.update(raw_content);
            hex::encode(hasher.finalize())
        }
    }
}
