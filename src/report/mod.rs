//! # Aggregating and Printing Results
//!
//! On the coordinator, gathered results are checked against the number of files
//! that were scattered. When the counts agree each file is paired with its
//! result and printed in collection order. When they do not, the run is still
//! reported, but files and results are printed as two separate blocks.
//!
//! ## Submodules
//!
//! - **printer**: `Report::assemble` and the text and JSON writers.
//! - **types**: Defines `Report` and `OutputFormat`.

mod printer;
mod types;

pub use printer::write_report;
pub use types::{OutputFormat, Report};
