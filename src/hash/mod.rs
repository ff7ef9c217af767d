//! # Hashing the Files Assigned to a Rank
//!
//! Each rank reads its assigned files one after another and digests their raw
//! bytes. A file that cannot be read does not stop the rank: it produces an
//! `Unreadable` result at its position and the loop continues.
//!
//! ## Submodules
//!
//! - **worker**: The per-rank hashing loop.
//! - **types**: Defines `HashResult` and its wire form.

mod types;
mod worker;

pub use types::HashResult;
pub use worker::{hash_file, hash_files};
