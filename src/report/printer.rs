use super::types::{OutputFormat, Report};
use crate::hash::HashResult;
use crate::partition::Partition;
use anyhow::{Context, Result as AnyhowResult};
use log::{error, info};
use serde_json::{json, Value};
use std::io::Write;

impl Report {
    /// Pairs gathered results with the files they belong to.
    ///
    /// `gathered` must be in gather order: every result of rank 0, then every
    /// result of rank 1, and so on, each rank's results in the order its files
    /// were assigned. The partition maps that order back to collection order.
    /// Pairing is positional only; results are never matched by content.
    ///
    /// # Arguments
    ///
    /// * `partition` - The partition the files were scattered with.
    /// * `gathered` - Decoded results from the gather.
    ///
    /// # Returns
    ///
    /// `Report::Paired` when there is exactly one result per file, otherwise
    /// `Report::Mismatch` with the files in collection order and the results as
    /// received.
    pub fn assemble(partition: &Partition, gathered: Vec<HashResult>) -> Report {
        match partition.restore_order(gathered) {
            Ok(hashes) => {
                info!("Paired {} hash(es) with their files", hashes.len());
                Report::Paired(partition.paths().iter().cloned().zip(hashes).collect())
            }
            Err(hashes) => {
                error!(
                    "Mismatch between the number of hashes and the number of files ({} != {})",
                    hashes.len(),
                    partition.len()
                );
                error!("Displaying files and hashes separately");
                Report::Mismatch {
                    files: partition.paths().to_vec(),
                    hashes,
                }
            }
        }
    }
}

/// Writes a report in the requested format.
///
/// # Arguments
///
/// * `report` - The assembled report.
/// * `format` - Text blocks or JSON.
/// * `out` - Destination, normally stdout.
///
/// # Returns
///
/// * `Ok(())` - The report was written and flushed.
/// * `Err(anyhow::Error)` - Writing failed.
pub fn write_report<W: Write>(report: &Report, format: OutputFormat, out: &mut W) -> AnyhowResult<()> {
    match format {
        OutputFormat::Text => render_text(report, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &render_json(report))
                .context("Failed to serialize report")?;
            writeln!(out).context("Failed to write report")
        }
    }?;
    out.flush().context("Failed to flush report")
}

/// Text layout: `<path>\n<digest>\n\n` per file when paired; when mismatched,
/// all paths, a blank line, all digests, a blank line.
fn render_text<W: Write>(report: &Report, out: &mut W) -> AnyhowResult<()> {
    match report {
        Report::Paired(pairs) => {
            for (path, hash) in pairs {
                write!(out, "{}\n{}\n\n", path, hash).context("Failed to write report")?;
            }
        }
        Report::Mismatch { files, hashes } => {
            for path in files {
                writeln!(out, "{}", path).context("Failed to write report")?;
            }
            writeln!(out).context("Failed to write report")?;
            for hash in hashes {
                writeln!(out, "{}", hash).context("Failed to write report")?;
            }
            writeln!(out).context("Failed to write report")?;
        }
    }
    Ok(())
}

fn render_json(report: &Report) -> Value {
    match report {
        Report::Paired(pairs) => Value::Array(
            pairs
                .iter()
                .map(|(path, hash)| json!({ "path": path, "digest": hash.digest() }))
                .collect(),
        ),
        Report::Mismatch { files, hashes } => json!({
            "error": format!(
                "hash count {} does not match file count {}",
                hashes.len(),
                files.len()
            ),
            "files": files,
            "hashes": hashes.iter().map(HashResult::digest).collect::<Vec<_>>(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::FileRecord;
    use crate::partition::partition_files;

    fn digest(tag: &str) -> HashResult {
        HashResult::Digest(format!("digest-of-{}", tag))
    }

    fn render(report: &Report, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_report(report, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_assemble_single_worker_pairs_against_collection_order() {
        // "a" is larger, so the sole bucket holds ["b", "a"]
        let partition =
            partition_files(vec![FileRecord::new("a", 10), FileRecord::new("b", 3)], 1).unwrap();
        let report = Report::assemble(&partition, vec![digest("b"), digest("a")]);
        assert_eq!(
            report,
            Report::Paired(vec![
                ("a".to_string(), digest("a")),
                ("b".to_string(), digest("b")),
            ])
        );
    }

    #[test]
    fn test_assemble_several_workers() {
        let files: Vec<FileRecord> = [40, 10, 30, 20, 50]
            .iter()
            .enumerate()
            .map(|(i, &size)| FileRecord::new(format!("f{}", i), size))
            .collect();
        let partition = partition_files(files, 3).unwrap();
        let gathered: Vec<HashResult> = (0..3)
            .flat_map(|rank| partition.bucket_paths(rank))
            .map(digest)
            .collect();

        match Report::assemble(&partition, gathered) {
            Report::Paired(pairs) => {
                assert_eq!(pairs.len(), 5);
                for (path, hash) in pairs {
                    assert_eq!(hash, digest(&path));
                }
            }
            other => panic!("expected paired report, got {:?}", other),
        }
    }

    #[test]
    fn test_assemble_truncated_results_falls_back() {
        let partition =
            partition_files(vec![FileRecord::new("a", 1), FileRecord::new("b", 2)], 2).unwrap();
        let report = Report::assemble(&partition, vec![digest("a")]);
        assert!(!report.is_paired());
        assert_eq!(
            render(&report, OutputFormat::Text),
            "a\nb\n\ndigest-of-a\n\n"
        );
    }

    #[test]
    fn test_assemble_surplus_results_are_kept_in_mismatch() {
        let partition = partition_files(vec![FileRecord::new("a", 1)], 2).unwrap();
        let report = Report::assemble(&partition, vec![digest("a"), HashResult::Unreadable]);
        assert_eq!(
            report,
            Report::Mismatch {
                files: vec!["a".to_string()],
                hashes: vec![digest("a"), HashResult::Unreadable],
            }
        );
    }

    #[test]
    fn test_text_layout_with_unreadable() {
        let report = Report::Paired(vec![
            ("x".to_string(), digest("x")),
            ("y".to_string(), HashResult::Unreadable),
        ]);
        assert_eq!(render(&report, OutputFormat::Text), "x\ndigest-of-x\n\ny\n\n\n");
    }

    #[test]
    fn test_json_layout() {
        let report = Report::Paired(vec![
            ("x".to_string(), digest("x")),
            ("y".to_string(), HashResult::Unreadable),
        ]);
        let value: Value = serde_json::from_str(&render(&report, OutputFormat::Json)).unwrap();
        assert_eq!(
            value,
            json!([
                { "path": "x", "digest": "digest-of-x" },
                { "path": "y", "digest": null },
            ])
        );
    }

    #[test]
    fn test_json_mismatch_layout() {
        let report = Report::Mismatch {
            files: vec!["a".to_string(), "b".to_string()],
            hashes: vec![digest("a")],
        };
        let value: Value = serde_json::from_str(&render(&report, OutputFormat::Json)).unwrap();
        assert_eq!(value["files"], json!(["a", "b"]));
        assert_eq!(value["hashes"], json!(["digest-of-a"]));
        assert!(value["error"].is_string());
    }

    #[test]
    fn test_empty_report_writes_nothing() {
        let partition = partition_files(Vec::new(), 2).unwrap();
        let report = Report::assemble(&partition, Vec::new());
        assert!(report.is_paired());
        assert_eq!(render(&report, OutputFormat::Text), "");
    }
}
