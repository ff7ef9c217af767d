use super::rank::run_rank;
use crate::comm::{Communicator, LocalGroup};
use crate::discover::FileRecord;
use crate::report::Report;
use crate::utils::DigestAlgorithm;
use anyhow::{anyhow, ensure, Context, Result as AnyhowResult};
use futures::future::join_all;
use log::{error, info};
use std::thread;
use tokio::task::JoinHandle;

/// Largest group `run_group` will start.
///
/// Every rank occupies a thread of tokio's blocking pool until the group
/// finishes, so the group must fit in the pool (512 threads by default).
pub const MAX_WORKERS: usize = 256;

/// Hashes `files` with a group of `workers` ranks running on blocking tasks.
///
/// Each rank gets its own endpoint of a [`LocalGroup`] and runs [`run_rank`] on
/// tokio's blocking pool; rank 0 is the coordinator and receives the file list.
/// The call returns once every rank has finished.
///
/// # Arguments
///
/// * `files` - Discovered files in collection order.
/// * `workers` - Number of ranks, from 1 to [`MAX_WORKERS`].
/// * `algorithm` - Digest to compute.
///
/// # Returns
///
/// * `Ok(Report)` - The coordinator's report.
/// * `Err(anyhow::Error)` - A rank failed or panicked. Per-file read failures are
///   not errors; they show up as unreadable entries in the report.
///
/// # Examples
///
/// ```rust,no_run
/// use scatter_digest::discover::collect_files;
/// use scatter_digest::pipeline::run_group;
/// use scatter_digest::utils::DigestAlgorithm;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let files = collect_files(&["."]);
///     let report = run_group(files, 4, DigestAlgorithm::Sha512).await?;
///     println!("{:?}", report);
///     Ok(())
/// }
/// ```
pub async fn run_group(
    files: Vec<FileRecord>,
    workers: usize,
    algorithm: DigestAlgorithm,
) -> AnyhowResult<Report> {
    ensure!(workers >= 1, "Worker pool must have at least one rank");
    ensure!(
        workers <= MAX_WORKERS,
        "Worker pool of {} exceeds the limit of {} ranks",
        workers,
        MAX_WORKERS
    );
    info!("Hashing {} file(s) with {} rank(s) using {}", files.len(), workers, algorithm);

    let mut files = Some(files);
    let tasks: Vec<JoinHandle<AnyhowResult<Option<Report>>>> = LocalGroup::spawn(workers)
        .into_iter()
        .map(|mut comm| {
            let files = if comm.context().is_root() { files.take() } else { None };
            tokio::task::spawn_blocking(move || {
                let rank = comm.context().rank;
                run_rank(&mut comm, files, algorithm).with_context(|| format!("Rank {} failed", rank))
            })
        })
        .collect();

    let results = join_all(tasks).await;
    let mut report = None;
    let mut first_error = None;

    for (rank, result) in results.into_iter().enumerate() {
        match result {
            Ok(Ok(Some(rank_report))) => report = Some(rank_report),
            Ok(Ok(None)) => {}
            Ok(Err(e)) => {
                error!("{:?}", e);
                first_error.get_or_insert(e);
            }
            Err(e) => {
                error!("Rank {} panicked: {:?}", rank, e);
                first_error.get_or_insert(anyhow!("Rank {} panicked: {}", rank, e));
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }
    report.context("Coordinator produced no report")
}

/// Runs a group of `workers` ranks on scoped OS threads and returns the
/// coordinator's report. Used by tests that drive ranks without a runtime.
#[doc(hidden)]
pub fn run_scoped(
    files: Vec<FileRecord>,
    workers: usize,
    algorithm: DigestAlgorithm,
) -> AnyhowResult<Report> {
    ensure!(workers >= 1, "Worker pool must have at least one rank");
    let mut files = Some(files);
    let outputs: Vec<AnyhowResult<Option<Report>>> = thread::scope(|scope| {
        let handles: Vec<_> = LocalGroup::spawn(workers)
            .into_iter()
            .map(|mut comm| {
                let files = if comm.context().is_root() { files.take() } else { None };
                scope.spawn(move || run_rank(&mut comm, files, algorithm))
            })
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(rank, handle)| {
                handle
                    .join()
                    .map_err(|_| anyhow!("Rank {} panicked", rank))
                    .and_then(|result| result.with_context(|| format!("Rank {} failed", rank)))
            })
            .collect()
    });

    let mut report = None;
    for (rank, output) in outputs.into_iter().enumerate() {
        match output? {
            Some(rank_report) if rank == 0 => report = Some(rank_report),
            Some(_) => return Err(anyhow!("Rank {} produced a report", rank)),
            None => {}
        }
    }
    report.context("Coordinator produced no report")
}
