//! # Load-Balanced Partitioning of Files Across Ranks
//!
//! This module runs on the coordinator only. It decides, once and up front, which
//! rank hashes which file. Files are sorted by size, interleaved with a transpose
//! so that size extremes are spread out, and dealt round-robin into one bucket
//! per rank. There is no rebalancing after this point.
//!
//! ## Submodules
//!
//! - **balancer**: The sort, reshuffle and round-robin assignment.
//! - **types**: Defines `Partition`, which also maps gathered results back to
//!   collection order.

mod balancer;
mod types;

pub use balancer::{partition_files, reshuffle};
pub use types::Partition;
