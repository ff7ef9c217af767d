use super::types::Partition;
use crate::discover::FileRecord;
use anyhow::{ensure, Result as AnyhowResult};
use log::debug;

/// Splits the discovered files into one bucket per worker, balancing total bytes.
///
/// The files are sorted by size, reshuffled with [`reshuffle`] so that small and
/// large files are interleaved, and then dealt out round-robin: the file at
/// reshuffled position `k` goes to bucket `k % workers`. This is a cheap
/// heuristic and does not guarantee an even split.
///
/// # Arguments
///
/// * `files` - Discovered files in collection order.
/// * `workers` - Size of the worker pool; must be at least 1.
///
/// # Returns
///
/// * `Ok(Partition)` - `workers` buckets that together hold every file exactly once.
/// * `Err(anyhow::Error)` - If `workers` is zero.
///
/// # Examples
///
/// ```rust
/// use scatter_digest::discover::FileRecord;
/// use scatter_digest::partition::partition_files;
///
/// let files = vec![FileRecord::new("a", 10), FileRecord::new("b", 3)];
/// let partition = partition_files(files, 1).unwrap();
/// assert_eq!(partition.bucket_paths(0), vec!["b", "a"]);
/// ```
pub fn partition_files(files: Vec<FileRecord>, workers: usize) -> AnyhowResult<Partition> {
    ensure!(workers >= 1, "Worker pool must have at least one rank");

    let mut order: Vec<usize> = (0..files.len()).collect();
    order.sort_by_key(|&index| files[index].size);
    let order = reshuffle(order, workers);

    let mut buckets = vec![Vec::new(); workers];
    let mut loads = vec![0u64; workers];
    for (position, index) in order.into_iter().enumerate() {
        let bucket = position % workers;
        loads[bucket] += files[index].size;
        buckets[bucket].push(index);
    }

    for (rank, (bucket, load)) in buckets.iter().zip(&loads).enumerate() {
        debug!("Bucket {}: {} file(s), {} byte(s)", rank, bucket.len(), load);
    }

    let paths = files.into_iter().map(|file| file.path).collect();
    Ok(Partition {
        paths,
        buckets,
        loads,
    })
}

/// Transposes a sequence laid out row-major in `buckets` columns.
///
/// The input is viewed as a matrix of `ceil(len / buckets)` rows where element
/// `r * buckets + c` sits at row `r`, column `c`. The output reads that matrix
/// column by column, skipping cells past the end of the input. The result is a
/// permutation of the input. With a single bucket the order is unchanged.
///
/// # Arguments
///
/// * `items` - Sequence to reorder.
/// * `buckets` - Number of columns; a value of zero is treated as one.
///
/// # Examples
///
/// ```rust
/// use scatter_digest::partition::reshuffle;
///
/// assert_eq!(reshuffle(vec![0, 1, 2, 3, 4], 2), vec![0, 2, 4, 1, 3]);
/// ```
pub fn reshuffle<T>(items: Vec<T>, buckets: usize) -> Vec<T> {
    let buckets = buckets.max(1);
    let len = items.len();
    let fill = len.div_ceil(buckets);

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut shuffled = Vec::with_capacity(len);
    for column in 0..buckets {
        for row in 0..fill {
            let source = row * buckets + column;
            if let Some(item) = slots.get_mut(source).and_then(Option::take) {
                shuffled.push(item);
            }
        }
    }
    shuffled
}
