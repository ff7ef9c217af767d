use crate::frame::{Frame, FrameTable};
use std::fmt::Debug;
use thiserror::Error;

/// Rank of the coordinator within every group.
pub const ROOT_RANK: usize = 0;

/// Identity of one rank within a fixed-size group.
///
/// Passed explicitly to everything that needs to know who it is running as,
/// instead of being looked up from global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupContext {
    /// Zero-based rank of this participant.
    pub rank: usize,
    /// Number of ranks in the group.
    pub size: usize,
}

impl GroupContext {
    pub fn new(rank: usize, size: usize) -> Self {
        Self { rank, size }
    }

    /// Whether this rank is the coordinator.
    pub fn is_root(&self) -> bool {
        self.rank == ROOT_RANK
    }
}

/// Errors raised by a collective operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommError {
    /// The other end of a link went away, usually because that rank exited early.
    #[error("Rank {peer} disconnected during {operation}")]
    PeerDisconnected { peer: usize, operation: &'static str },

    /// A message of the wrong kind arrived, meaning the ranks disagree on which
    /// collective is running.
    #[error("Rank {peer} sent an unexpected {received} packet during {operation}")]
    UnexpectedPacket {
        peer: usize,
        operation: &'static str,
        received: &'static str,
    },

    /// A byte count did not match what was announced for this rank.
    #[error("Rank {rank} expected {expected} byte(s) during {operation}, got {actual}")]
    LengthMismatch {
        rank: usize,
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The coordinator was not given the data it has to distribute or collect with.
    #[error("Coordinator called {operation} without its {argument}")]
    MissingRootArgument {
        operation: &'static str,
        argument: &'static str,
    },

    /// The coordinator's per-rank data does not cover every rank in the group.
    #[error("{operation} needs {expected} per-rank entries, got {actual}")]
    GroupSizeMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// The four collectives the hashing pipeline needs from a rank group.
///
/// Every rank must call the same collectives in the same order. Arguments that
/// only the coordinator holds are `Option`s which other ranks pass as `None`;
/// results that only the coordinator receives come back as `Some` on the
/// coordinator and `None` everywhere else.
pub trait Communicator {
    /// This rank's identity in the group.
    fn context(&self) -> GroupContext;

    /// Sends `values[r]` to every rank `r` and returns this rank's value.
    fn scatter_fixed(&mut self, values: Option<&[u64]>) -> Result<u64, CommError>;

    /// Sends each rank its slice of `frame` and returns this rank's bytes.
    ///
    /// `expected_len` is the byte count this rank learned from the preceding
    /// [`Communicator::scatter_fixed`].
    fn scatter_variable(
        &mut self,
        frame: Option<&Frame>,
        expected_len: usize,
    ) -> Result<Vec<u8>, CommError>;

    /// Collects one value from every rank, ordered by rank.
    fn gather_fixed(&mut self, value: u64) -> Result<Option<Vec<u64>>, CommError>;

    /// Collects every rank's bytes into one buffer laid out by `table`.
    ///
    /// The coordinator builds `table` from the lengths returned by a preceding
    /// [`Communicator::gather_fixed`].
    fn gather_variable(
        &mut self,
        bytes: &[u8],
        table: Option<&FrameTable>,
    ) -> Result<Option<Vec<u8>>, CommError>;
}
