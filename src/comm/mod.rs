//! # Collective Communication Between Ranks
//!
//! The pipeline needs four collectives from its rank group: a fixed-size scatter
//! and gather of one integer per rank, and a variable-size scatter and gather of
//! framed byte buffers. They are expressed as the `Communicator` trait so that
//! the partitioning, hashing and reporting logic does not depend on how ranks
//! are actually connected.
//!
//! ## Submodules
//!
//! - **local**: An in-process group where every rank is a thread linked to the
//!   coordinator by FIFO channels. A group of one is the single-process double.
//! - **types**: Defines `Communicator`, `GroupContext` and `CommError`.

mod local;
mod types;

pub use local::{LocalComm, LocalGroup};
pub use types::{CommError, Communicator, GroupContext, ROOT_RANK};
