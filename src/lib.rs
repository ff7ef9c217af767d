//! Scatter Digest Library
//!
//! This library hashes a set of files with a fixed pool of ranks. The
//! coordinator balances files across ranks by size, scatters the path lists,
//! every rank hashes its share, and the digests are gathered back and printed
//! in the order the files were discovered.
//!

pub mod comm;
pub mod discover;
pub mod frame;
pub mod hash;
pub mod partition;
pub mod pipeline;
pub mod report;
pub mod utils;
