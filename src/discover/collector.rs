use super::types::FileRecord;
use log::{debug, error, info, warn};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Collects every regular file reachable from the given input paths.
///
/// Inputs are processed in order. A regular file is taken as-is, a directory is
/// walked recursively and its regular files are taken in file-name order. Paths
/// that do not exist are reported and skipped, so a typo in one argument does
/// not cancel the whole run.
///
/// # Arguments
///
/// * `inputs` - Files or directories named on the command line.
///
/// # Returns
///
/// The discovered files with their sizes, in collection order. This order is the
/// one used when results are printed.
///
/// # Examples
///
/// ```rust,no_run
/// use scatter_digest::discover::collect_files;
///
/// let files = collect_files(&["/etc/hosts", "/var/log"]);
/// println!("Discovered {} file(s)", files.len());
/// ```
pub fn collect_files<P: AsRef<Path>>(inputs: &[P]) -> Vec<FileRecord> {
    let mut files = Vec::new();
    for input in inputs {
        collect_path(input.as_ref(), &mut files);
    }
    info!("Discovered {} file(s) from {} input path(s)", files.len(), inputs.len());
    files
}

/// Appends the regular files found at `path` to `files`.
fn collect_path(path: &Path, files: &mut Vec<FileRecord>) {
    if !path.exists() {
        error!("Path does not exist: {}", path.display());
        return;
    }

    if path.is_file() {
        push_record(path, files);
    } else if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.path().is_file() => push_record(entry.path(), files),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry under {}: {}", path.display(), e),
            }
        }
    } else {
        debug!("Ignoring non-regular path: {}", path.display());
    }
}

/// Builds a record for one file, querying its size.
///
/// Paths that are not valid UTF-8 or that contain a line terminator cannot be
/// carried by the newline framing and are skipped.
fn push_record(path: &Path, files: &mut Vec<FileRecord>) {
    let Some(path_str) = path.to_str() else {
        warn!("Skipping non UTF-8 path: {}", path.display());
        return;
    };
    if path_str.contains('\n') {
        warn!("Skipping path containing a newline: {:?}", path_str);
        return;
    }

    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            warn!("Failed to query size of {}: {}", path_str, e);
            0
        }
    };
    files.push(FileRecord::new(path_str, size));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_single_file_with_size() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.bin");
        fs::write(&file, b"0123456789").unwrap();

        let files = collect_files(&[&file]);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 10);
        assert_eq!(files[0].path, file.to_str().unwrap());
    }

    #[test]
    fn test_collect_directory_recursively_in_name_order() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.txt"), b"bb").unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), b"ccc").unwrap();

        let files = collect_files(&[dir.path()]);
        let names: Vec<&str> = files
            .iter()
            .map(|f| Path::new(&f.path).file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_missing_path_is_skipped() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("present");
        fs::write(&present, b"x").unwrap();
        let missing = dir.path().join("missing");

        let files = collect_files(&[&missing, &present]);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, present.to_str().unwrap());
    }

    #[test]
    fn test_no_inputs_yields_nothing() {
        let inputs: Vec<&Path> = Vec::new();
        assert!(collect_files(&inputs).is_empty());
    }
}
