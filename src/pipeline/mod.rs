//! # Running the Scatter, Hash, Gather Pipeline
//!
//! Every rank runs the same body: the coordinator partitions and scatters, all
//! ranks hash their share, and the results are gathered back to the coordinator
//! for reporting. The two collective phases are the only points where ranks
//! wait on each other.
//!
//! ## Usage
//!
//! `run_group` launches an in-process group and is what the binary uses.
//! `run_rank` is the per-rank body and works with any `Communicator`.
//!
//! ## Submodules
//!
//! - **rank**: The per-rank body.
//! - **launcher**: Starts a rank group on tokio's blocking pool and joins it.

mod launcher;
mod rank;

pub use launcher::{run_group, MAX_WORKERS};
#[doc(hidden)]
pub use launcher::run_scoped;
pub use rank::run_rank;
