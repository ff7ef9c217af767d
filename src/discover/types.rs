use std::fmt::Debug;

/// A discovered file and its size at collection time.
///
/// Records only live on the coordinator while the partition is computed; the
/// size is used for balancing and then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path of the file as given or as produced by the directory walk.
    pub path: String,
    /// Size of the file in bytes.
    pub size: u64,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}
