use super::types::{CommError, Communicator, GroupContext, ROOT_RANK};
use crate::frame::{Frame, FrameTable};
use log::trace;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Message carried over a link between the coordinator and one rank.
#[derive(Debug)]
enum Packet {
    Count(u64),
    Bytes(Vec<u8>),
}

impl Packet {
    fn kind(&self) -> &'static str {
        match self {
            Packet::Count(_) => "count",
            Packet::Bytes(_) => "bytes",
        }
    }
}

/// The coordinator's two-way link to one non-root rank.
#[derive(Debug)]
struct PeerLink {
    rank: usize,
    to_peer: UnboundedSender<Packet>,
    from_peer: UnboundedReceiver<Packet>,
}

#[derive(Debug)]
enum Endpoint {
    /// Links to ranks `1..size`, in rank order.
    Root { peers: Vec<PeerLink> },
    Worker {
        to_root: UnboundedSender<Packet>,
        from_root: UnboundedReceiver<Packet>,
    },
}

/// One rank's endpoint in an in-process group built by [`LocalGroup::spawn`].
///
/// Each endpoint is meant to be moved to its own thread. The collectives block
/// the calling thread, so they must not be called from inside an async task;
/// use `tokio::task::spawn_blocking` or a plain thread.
#[derive(Debug)]
pub struct LocalComm {
    context: GroupContext,
    endpoint: Endpoint,
}

/// Builder for an in-process rank group.
///
/// Ranks run as threads of the current process. The coordinator holds a
/// dedicated FIFO channel pair per rank, so messages from one rank are always
/// seen in the order that rank sent them, whatever the other ranks do. A rank
/// that exits early drops its channels and every rank waiting on it gets
/// [`CommError::PeerDisconnected`] instead of blocking forever.
pub struct LocalGroup;

impl LocalGroup {
    /// Creates the endpoints of a group of `size` ranks, indexed by rank.
    ///
    /// With `size == 1` the single endpoint is the coordinator and every
    /// collective is a local copy. `size == 0` yields no endpoints.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scatter_digest::comm::{Communicator, LocalGroup};
    ///
    /// let mut group = LocalGroup::spawn(1);
    /// let root = &mut group[0];
    /// assert_eq!(root.scatter_fixed(Some(&[7][..])).unwrap(), 7);
    /// assert_eq!(root.gather_fixed(3).unwrap(), Some(vec![3]));
    /// ```
    pub fn spawn(size: usize) -> Vec<LocalComm> {
        if size == 0 {
            return Vec::new();
        }

        let mut peers = Vec::with_capacity(size - 1);
        let mut workers = Vec::with_capacity(size - 1);
        for rank in 1..size {
            let (to_peer, from_root) = unbounded_channel();
            let (to_root, from_peer) = unbounded_channel();
            peers.push(PeerLink {
                rank,
                to_peer,
                from_peer,
            });
            workers.push(LocalComm {
                context: GroupContext::new(rank, size),
                endpoint: Endpoint::Worker { to_root, from_root },
            });
        }

        let root = LocalComm {
            context: GroupContext::new(ROOT_RANK, size),
            endpoint: Endpoint::Root { peers },
        };
        std::iter::once(root).chain(workers).collect()
    }
}

fn send(
    tx: &UnboundedSender<Packet>,
    packet: Packet,
    peer: usize,
    operation: &'static str,
) -> Result<(), CommError> {
    tx.send(packet)
        .map_err(|_| CommError::PeerDisconnected { peer, operation })
}

fn recv(
    rx: &mut UnboundedReceiver<Packet>,
    peer: usize,
    operation: &'static str,
) -> Result<Packet, CommError> {
    rx.blocking_recv()
        .ok_or(CommError::PeerDisconnected { peer, operation })
}

fn expect_count(packet: Packet, peer: usize, operation: &'static str) -> Result<u64, CommError> {
    match packet {
        Packet::Count(value) => Ok(value),
        other => Err(CommError::UnexpectedPacket {
            peer,
            operation,
            received: other.kind(),
        }),
    }
}

/// Unwraps a bytes packet of exactly `expected` bytes.
///
/// `sender` is the rank the packet came from; `rank` is the rank whose byte
/// count is checked.
fn expect_bytes(
    packet: Packet,
    sender: usize,
    rank: usize,
    operation: &'static str,
    expected: usize,
) -> Result<Vec<u8>, CommError> {
    match packet {
        Packet::Bytes(bytes) if bytes.len() == expected => Ok(bytes),
        Packet::Bytes(bytes) => Err(CommError::LengthMismatch {
            rank,
            operation,
            expected,
            actual: bytes.len(),
        }),
        other => Err(CommError::UnexpectedPacket {
            peer: sender,
            operation,
            received: other.kind(),
        }),
    }
}

fn check_group_size(
    operation: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), CommError> {
    if expected == actual {
        Ok(())
    } else {
        Err(CommError::GroupSizeMismatch {
            operation,
            expected,
            actual,
        })
    }
}

impl Communicator for LocalComm {
    fn context(&self) -> GroupContext {
        self.context
    }

    fn scatter_fixed(&mut self, values: Option<&[u64]>) -> Result<u64, CommError> {
        const OP: &str = "scatter_fixed";
        let size = self.context.size;
        match &mut self.endpoint {
            Endpoint::Root { peers } => {
                let values = values.ok_or(CommError::MissingRootArgument {
                    operation: OP,
                    argument: "per-rank values",
                })?;
                check_group_size(OP, size, values.len())?;
                for link in peers.iter() {
                    send(&link.to_peer, Packet::Count(values[link.rank]), link.rank, OP)?;
                }
                Ok(values[ROOT_RANK])
            }
            Endpoint::Worker { from_root, .. } => {
                let value = expect_count(recv(from_root, ROOT_RANK, OP)?, ROOT_RANK, OP)?;
                trace!("Rank {} received count {}", self.context.rank, value);
                Ok(value)
            }
        }
    }

    fn scatter_variable(
        &mut self,
        frame: Option<&Frame>,
        expected_len: usize,
    ) -> Result<Vec<u8>, CommError> {
        const OP: &str = "scatter_variable";
        let context = self.context;
        match &mut self.endpoint {
            Endpoint::Root { peers } => {
                let frame = frame.ok_or(CommError::MissingRootArgument {
                    operation: OP,
                    argument: "frame",
                })?;
                check_group_size(OP, context.size, frame.table.recipients())?;
                if frame.table.total() != frame.buffer.len() {
                    return Err(CommError::LengthMismatch {
                        rank: ROOT_RANK,
                        operation: OP,
                        expected: frame.table.total(),
                        actual: frame.buffer.len(),
                    });
                }

                for link in peers.iter() {
                    let piece = frame.table.slice(&frame.buffer, link.rank).unwrap_or_default();
                    send(&link.to_peer, Packet::Bytes(piece.to_vec()), link.rank, OP)?;
                }

                let own = frame.table.slice(&frame.buffer, ROOT_RANK).unwrap_or_default();
                if own.len() != expected_len {
                    return Err(CommError::LengthMismatch {
                        rank: ROOT_RANK,
                        operation: OP,
                        expected: expected_len,
                        actual: own.len(),
                    });
                }
                Ok(own.to_vec())
            }
            Endpoint::Worker { from_root, .. } => {
                let packet = recv(from_root, ROOT_RANK, OP)?;
                expect_bytes(packet, ROOT_RANK, context.rank, OP, expected_len)
            }
        }
    }

    fn gather_fixed(&mut self, value: u64) -> Result<Option<Vec<u64>>, CommError> {
        const OP: &str = "gather_fixed";
        match &mut self.endpoint {
            Endpoint::Root { peers } => {
                let mut values = Vec::with_capacity(peers.len() + 1);
                values.push(value);
                for link in peers.iter_mut() {
                    let packet = recv(&mut link.from_peer, link.rank, OP)?;
                    values.push(expect_count(packet, link.rank, OP)?);
                }
                Ok(Some(values))
            }
            Endpoint::Worker { to_root, .. } => {
                send(to_root, Packet::Count(value), ROOT_RANK, OP)?;
                Ok(None)
            }
        }
    }

    fn gather_variable(
        &mut self,
        bytes: &[u8],
        table: Option<&FrameTable>,
    ) -> Result<Option<Vec<u8>>, CommError> {
        const OP: &str = "gather_variable";
        let size = self.context.size;
        match &mut self.endpoint {
            Endpoint::Root { peers } => {
                let table = table.ok_or(CommError::MissingRootArgument {
                    operation: OP,
                    argument: "frame table",
                })?;
                check_group_size(OP, size, table.recipients())?;

                let mut buffer = vec![0u8; table.total()];
                let own = table.lengths()[ROOT_RANK];
                if bytes.len() != own {
                    return Err(CommError::LengthMismatch {
                        rank: ROOT_RANK,
                        operation: OP,
                        expected: own,
                        actual: bytes.len(),
                    });
                }
                let offset = table.offsets()[ROOT_RANK];
                buffer[offset..offset + own].copy_from_slice(bytes);

                for link in peers.iter_mut() {
                    let packet = recv(&mut link.from_peer, link.rank, OP)?;
                    let expected = table.lengths()[link.rank];
                    let piece = expect_bytes(packet, link.rank, link.rank, OP, expected)?;
                    let offset = table.offsets()[link.rank];
                    buffer[offset..offset + expected].copy_from_slice(&piece);
                }
                Ok(Some(buffer))
            }
            Endpoint::Worker { to_root, .. } => {
                send(to_root, Packet::Bytes(bytes.to_vec()), ROOT_RANK, OP)?;
                Ok(None)
            }
        }
    }
}
