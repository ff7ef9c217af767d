//! # Discovering Input Files
//!
//! This module expands the paths given on the command line into the flat list of
//! regular files to hash, recording each file's size for the partitioner.
//!
//! ## Submodules
//!
//! - **collector**: Path expansion and size queries.
//! - **types**: Defines `FileRecord`.

mod collector;
mod types;

pub use collector::collect_files;
pub use types::FileRecord;
