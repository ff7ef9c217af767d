//! Scatter Digest: Hash Files Across a Pool of Ranks
//!
//! This application hashes every file under the given paths with a fixed pool of
//! ranks and prints one digest per file on stdout.
//!
//! ## Design Overview
//! - **Discovery**: Expands the input paths into regular files with their sizes (`discover`).
//! - **Partitioning**: The coordinator (rank 0) balances files across ranks by size (`partition`).
//! - **Scatter**: Path lists are framed and sent to every rank (`frame`, `comm`).
//! - **Hashing**: Each rank digests its files in order (`hash`).
//! - **Gather and report**: Digests are framed, gathered on the coordinator, paired
//!   with their files and printed (`report`).
//!
//! ## Dependencies
//! - **`tokio`**: Runtime whose blocking pool hosts the ranks.
//! - **`log` and `env_logger`**: Logging to stderr instead of `println!`.
//! - **`clap`**: Command-line arguments, with environment variable fallbacks.
//! - **`sha2` and `hex`**: Digests and their hex encoding.
//! - **`walkdir`**: Recursive directory traversal.
//! - **`serde_json`**: JSON output.
//!
//! ## Usage
//! ```sh
//! scatter-digest --workers 8 /data/archive /data/extra.bin
//! ```
//! The pool size and digest can also be set from the environment:
//! ```sh
//! export SCATTER_DIGEST_WORKERS=8
//! export SCATTER_DIGEST_ALGORITHM=sha256
//! scatter-digest /data/archive
//! ```
//! Logs go to stderr and are controlled by `RUST_LOG` (default `warn`):
//! ```sh
//! RUST_LOG=debug scatter-digest /data/archive
//! ```
//! Missing input paths, unreadable files and a result count that does not match
//! the file count are only reported through the log, so `RUST_LOG=off` hides
//! them. The report on stdout still shows unreadable files as empty digests and
//! a mismatch as separate file and digest lists.

use anyhow::Result as AnyhowResult;
use clap::Parser;
use log::{info, warn};
use scatter_digest::discover::collect_files;
use scatter_digest::pipeline::{run_group, MAX_WORKERS};
use scatter_digest::report::{write_report, OutputFormat};
use scatter_digest::utils::DigestAlgorithm;
use std::path::PathBuf;
use std::thread;

/// Command-line arguments for configuring a hashing run.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = None,
    after_help = "Diagnostics (missing paths, unreadable files, result count mismatches) \
                  are logged to stderr under RUST_LOG (default: warn). RUST_LOG=off silences them."
)]
struct Args {
    /// Files or directories to hash; directories are walked recursively.
    #[clap(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Number of ranks in the pool, rank 0 included (defaults to the number of CPUs).
    #[clap(
        short,
        long,
        env = "SCATTER_DIGEST_WORKERS",
        value_parser = clap::value_parser!(u16).range(1..=MAX_WORKERS as i64)
    )]
    workers: Option<u16>,

    /// Digest algorithm.
    #[clap(short, long, env = "SCATTER_DIGEST_ALGORITHM", value_enum, default_value_t = DigestAlgorithm::Sha512)]
    algorithm: DigestAlgorithm,

    /// Output format.
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Discovers the input files, hashes them with a rank group and prints the report.
///
/// # Returns
/// - `Ok(())` if the run completed, including runs where some files were unreadable
///   or the result count did not match.
/// - `Err(anyhow::Error)` if a rank failed or the report could not be written.
///
/// Missing paths are a usage error reported by `clap`, which exits non-zero before
/// any rank is started.
#[tokio::main]
async fn main() -> AnyhowResult<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command-line arguments
    let args = Args::parse();
    let workers = args
        .workers
        .map(usize::from)
        .unwrap_or_else(|| thread::available_parallelism().map_or(1, |n| n.get()))
        .min(MAX_WORKERS);
    info!("Starting scatter-digest with {} rank(s)", workers);

    let files = collect_files(&args.paths);
    let report = run_group(files, workers, args.algorithm).await?;
    if !report.is_paired() {
        warn!("Files and hashes could not be paired; printing them separately");
    }

    let stdout = std::io::stdout();
    write_report(&report, args.format, &mut stdout.lock())?;
    Ok(())
}
