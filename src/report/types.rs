use crate::hash::HashResult;
use clap::ValueEnum;
use std::fmt::Debug;

/// Final result of a run, assembled on the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// One result per file, in original collection order.
    Paired(Vec<(String, HashResult)>),
    /// The gathered result count did not match the file count, so files and
    /// results are reported separately without pairing.
    Mismatch {
        files: Vec<String>,
        hashes: Vec<HashResult>,
    },
}

impl Report {
    pub fn is_paired(&self) -> bool {
        matches!(self, Report::Paired(_))
    }
}

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `<path>\n<digest>\n\n` blocks.
    #[default]
    Text,
    /// A JSON document.
    Json,
}
