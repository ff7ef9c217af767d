use std::fmt::{self, Debug};

/// Outcome of hashing one file.
///
/// On the wire an unreadable file is the empty line; digests are never empty,
/// so the two cannot be confused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashResult {
    /// Lowercase hex digest of the file's bytes.
    Digest(String),
    /// The file could not be read.
    Unreadable,
}

impl HashResult {
    /// The line used to carry this result through a frame.
    pub fn to_wire(&self) -> &str {
        match self {
            HashResult::Digest(digest) => digest.as_str(),
            HashResult::Unreadable => "",
        }
    }

    /// Parses a line received through a frame.
    pub fn from_wire(line: String) -> Self {
        if line.is_empty() {
            HashResult::Unreadable
        } else {
            HashResult::Digest(line)
        }
    }

    /// The digest, if the file was readable.
    pub fn digest(&self) -> Option<&str> {
        match self {
            HashResult::Digest(digest) => Some(digest.as_str()),
            HashResult::Unreadable => None,
        }
    }
}

impl fmt::Display for HashResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_wire())
    }
}
