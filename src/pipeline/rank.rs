use crate::comm::{CommError, Communicator};
use crate::discover::FileRecord;
use crate::frame::{decode, encode, Frame, FrameTable};
use crate::hash::{hash_files, HashResult};
use crate::partition::{partition_files, Partition};
use crate::report::Report;
use crate::utils::DigestAlgorithm;
use anyhow::{Context, Result as AnyhowResult};
use log::{debug, info};

/// Runs one rank's share of a hashing run.
///
/// Every rank in the group calls this with its own communicator. The coordinator
/// passes the discovered files; it partitions them, frames the buckets and
/// scatters them. Every rank, the coordinator included, hashes the paths it
/// receives, frames the results and sends them back. The coordinator then
/// assembles the report.
///
/// # Arguments
///
/// * `comm` - This rank's endpoint in the group.
/// * `files` - `Some` on the coordinator, `None` on every other rank.
/// * `algorithm` - Digest to compute.
///
/// # Returns
///
/// * `Ok(Some(Report))` - On the coordinator.
/// * `Ok(None)` - On every other rank.
/// * `Err(anyhow::Error)` - A collective failed or a frame could not be decoded.
pub fn run_rank<C: Communicator>(
    comm: &mut C,
    files: Option<Vec<FileRecord>>,
    algorithm: DigestAlgorithm,
) -> AnyhowResult<Option<Report>> {
    let context = comm.context();

    let partition = if context.is_root() {
        let files = files.ok_or(CommError::MissingRootArgument {
            operation: "run_rank",
            argument: "file list",
        })?;
        Some(partition_files(files, context.size)?)
    } else {
        None
    };

    let paths = receive_assignment(comm, partition.as_ref())?;
    debug!("Rank {} received {} file(s)", context.rank, paths.len());

    let results = hash_files(&paths, algorithm);
    info!("Rank {} hashed {} file(s)", context.rank, results.len());

    let gathered = send_results(comm, &results)?;

    match (partition, gathered) {
        (Some(partition), Some(gathered)) => {
            let hashes = decode(&gathered)
                .context("Failed to decode gathered hashes")?
                .into_iter()
                .map(HashResult::from_wire)
                .collect();
            Ok(Some(Report::assemble(&partition, hashes)))
        }
        _ => Ok(None),
    }
}

/// Scatters the bucket lengths, then the buckets, and decodes this rank's paths.
fn receive_assignment<C: Communicator>(
    comm: &mut C,
    partition: Option<&Partition>,
) -> AnyhowResult<Vec<String>> {
    let frame = partition.map(|partition| Frame::pack(&partition.bucket_lists()));
    let lengths: Option<Vec<u64>> = frame
        .as_ref()
        .map(|frame| frame.table.lengths().iter().map(|&len| len as u64).collect());

    let length = comm
        .scatter_fixed(lengths.as_deref())
        .context("Failed to scatter assignment lengths")?;
    let bytes = comm
        .scatter_variable(frame.as_ref(), length as usize)
        .context("Failed to scatter assignments")?;
    decode(&bytes).context("Failed to decode assigned paths")
}

/// Gathers the result lengths, then the framed results.
///
/// Returns the concatenated buffer on the coordinator and `None` elsewhere.
fn send_results<C: Communicator>(
    comm: &mut C,
    results: &[HashResult],
) -> AnyhowResult<Option<Vec<u8>>> {
    let wire: Vec<&str> = results.iter().map(HashResult::to_wire).collect();
    let bytes = encode(&wire);

    let lengths = comm
        .gather_fixed(bytes.len() as u64)
        .context("Failed to gather result lengths")?;
    let table = lengths
        .map(|lengths| FrameTable::from_lengths(lengths.into_iter().map(|len| len as usize).collect()));

    comm.gather_variable(&bytes, table.as_ref())
        .context("Failed to gather results")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::{GroupContext, LocalGroup};
    use crate::utils::compute_file_digest;
    use std::fs;
    use tempfile::tempdir;

    /// Wraps a communicator and drops the last result line the coordinator gathers.
    struct TruncatingComm<C>(C);

    impl<C: Communicator> Communicator for TruncatingComm<C> {
        fn context(&self) -> GroupContext {
            self.0.context()
        }

        fn scatter_fixed(&mut self, values: Option<&[u64]>) -> Result<u64, CommError> {
            self.0.scatter_fixed(values)
        }

        fn scatter_variable(
            &mut self,
            frame: Option<&Frame>,
            expected_len: usize,
        ) -> Result<Vec<u8>, CommError> {
            self.0.scatter_variable(frame, expected_len)
        }

        fn gather_fixed(&mut self, value: u64) -> Result<Option<Vec<u64>>, CommError> {
            self.0.gather_fixed(value)
        }

        fn gather_variable(
            &mut self,
            bytes: &[u8],
            table: Option<&FrameTable>,
        ) -> Result<Option<Vec<u8>>, CommError> {
            let gathered = self.0.gather_variable(bytes, table)?;
            Ok(gathered.map(|mut buffer| {
                buffer.pop();
                while buffer.last().is_some_and(|&b| b != b'\n') {
                    buffer.pop();
                }
                buffer
            }))
        }
    }

    fn write_files(dir: &std::path::Path, contents: &[&[u8]]) -> Vec<FileRecord> {
        contents
            .iter()
            .enumerate()
            .map(|(i, content)| {
                let path = dir.join(format!("file{}", i));
                fs::write(&path, content).unwrap();
                FileRecord::new(path.to_str().unwrap(), content.len() as u64)
            })
            .collect()
    }

    fn run_threads(size: usize, files: Vec<FileRecord>) -> Report {
        crate::pipeline::run_scoped(files, size, DigestAlgorithm::Sha512).unwrap()
    }

    #[test]
    fn test_single_rank_end_to_end() {
        let dir = tempdir().unwrap();
        let files = write_files(dir.path(), &[b"0123456789", b"abc"]);
        let expected: Vec<String> = files.iter().map(|f| f.path.clone()).collect();

        let mut group = LocalGroup::spawn(1);
        let report = run_rank(&mut group[0], Some(files), DigestAlgorithm::Sha512)
            .unwrap()
            .unwrap();

        let Report::Paired(pairs) = report else {
            panic!("expected paired report");
        };
        assert_eq!(pairs[0].0, expected[0]);
        assert_eq!(
            pairs[0].1,
            HashResult::Digest(compute_file_digest(DigestAlgorithm::Sha512, b"0123456789"))
        );
        assert_eq!(pairs[1].0, expected[1]);
        assert_eq!(
            pairs[1].1,
            HashResult::Digest(compute_file_digest(DigestAlgorithm::Sha512, b"abc"))
        );
    }

    #[test]
    fn test_several_ranks_pair_each_file_with_its_digest() {
        let dir = tempdir().unwrap();
        let contents: Vec<Vec<u8>> = (0..11).map(|i| vec![b'x'; (i * 37) % 13 + 1]).collect();
        let slices: Vec<&[u8]> = contents.iter().map(Vec::as_slice).collect();
        let files = write_files(dir.path(), &slices);

        let Report::Paired(pairs) = run_threads(4, files.clone()) else {
            panic!("expected paired report");
        };
        assert_eq!(pairs.len(), files.len());
        for ((path, hash), (file, content)) in pairs.iter().zip(files.iter().zip(&contents)) {
            assert_eq!(path, &file.path);
            assert_eq!(
                hash,
                &HashResult::Digest(compute_file_digest(DigestAlgorithm::Sha512, content))
            );
        }
    }

    #[test]
    fn test_more_ranks_than_files() {
        let dir = tempdir().unwrap();
        let files = write_files(dir.path(), &[b"only"]);
        let report = run_threads(3, files);
        let Report::Paired(pairs) = report else {
            panic!("expected paired report");
        };
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_no_files_gives_empty_report() {
        assert_eq!(run_threads(3, Vec::new()), Report::Paired(Vec::new()));
    }

    #[test]
    fn test_unreadable_file_does_not_abort() {
        let dir = tempdir().unwrap();
        let mut files = write_files(dir.path(), &[b"a", b"bb", b"ccc"]);
        let missing = dir.path().join("missing");
        files.insert(2, FileRecord::new(missing.to_str().unwrap(), 0));

        let Report::Paired(pairs) = run_threads(2, files) else {
            panic!("expected paired report");
        };
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[2].1, HashResult::Unreadable);
        assert_eq!(
            pairs.iter().filter(|(_, h)| *h == HashResult::Unreadable).count(),
            1
        );
    }

    #[test]
    fn test_truncated_gather_falls_back_to_mismatch() {
        let dir = tempdir().unwrap();
        let files = write_files(dir.path(), &[b"a", b"bb"]);
        let mut comm = TruncatingComm(LocalGroup::spawn(1).remove(0));

        let report = run_rank(&mut comm, Some(files), DigestAlgorithm::Sha256)
            .unwrap()
            .unwrap();
        match report {
            Report::Mismatch { files, hashes } => {
                assert_eq!(files.len(), 2);
                assert_eq!(hashes.len(), 1);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_root_without_files_is_an_error() {
        let mut group = LocalGroup::spawn(1);
        assert!(run_rank(&mut group[0], None, DigestAlgorithm::Sha512).is_err());
    }
}
