use std::fmt::Debug;

/// Assignment of every discovered file to exactly one worker rank.
///
/// The original collection-order path list is kept alongside the buckets so that
/// results, which come back in bucket-concatenation order, can be put back into
/// collection order. Buckets hold indices into `paths`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Paths in original collection order.
    pub(crate) paths: Vec<String>,
    /// One bucket per rank; each entry is an index into `paths`.
    pub(crate) buckets: Vec<Vec<usize>>,
    /// Total bytes assigned to each bucket.
    pub(crate) loads: Vec<u64>,
}

impl Partition {
    /// Number of buckets, equal to the worker-pool size.
    pub fn workers(&self) -> usize {
        self.buckets.len()
    }

    /// Number of files across all buckets.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in original collection order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Total bytes assigned to each bucket.
    pub fn loads(&self) -> &[u64] {
        &self.loads
    }

    /// The ordered paths assigned to `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not below `workers()`.
    pub fn bucket_paths(&self, rank: usize) -> Vec<&str> {
        self.buckets[rank]
            .iter()
            .map(|&index| self.paths[index].as_str())
            .collect()
    }

    /// All bucket paths, one `Vec` per rank, ready for framing.
    pub fn bucket_lists(&self) -> Vec<Vec<&str>> {
        (0..self.workers()).map(|rank| self.bucket_paths(rank)).collect()
    }

    /// Original indices in the order results arrive after a gather: bucket 0
    /// first, then bucket 1, and so on, each in intra-bucket order.
    pub fn gather_order(&self) -> Vec<usize> {
        self.buckets.iter().flatten().copied().collect()
    }

    /// Reorders a sequence given in gather order into original collection order.
    ///
    /// Hands `items` back untouched as `Err` when it does not hold exactly one
    /// element per file.
    pub fn restore_order<T>(&self, items: Vec<T>) -> Result<Vec<T>, Vec<T>> {
        if items.len() != self.len() {
            return Err(items);
        }
        let mut indexed: Vec<(usize, T)> = self.gather_order().into_iter().zip(items).collect();
        indexed.sort_unstable_by_key(|&(index, _)| index);
        Ok(indexed.into_iter().map(|(_, item)| item).collect())
    }
}
