use crate::error::{GenError, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffix of the source files handed to the parser.
pub const SOURCE_SUFFIX: &str = "rs";

/// File scanner for traversing the handler source tree.
///
/// The `FileScanner` recursively walks a directory to find every Rust source file.
/// Nothing is skipped: `target`, hidden and vendored directories are scanned like any
/// other. Entries are visited in file-name order so two runs over the same tree see
/// the files in the same order.
///
/// # Example
///
/// ```no_run
/// use routegen::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./src/api"));
/// let files = scanner.scan().unwrap();
/// println!("Found {} Rust files", files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
}

impl FileScanner {
    /// Creates a new `FileScanner` for the specified root directory.
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Scans the directory tree and collects all `.rs` files, depth first.
    ///
    /// Symbolic links are followed. A link pointing back at one of its ancestor
    /// directories is reported and skipped rather than walked forever.
    ///
    /// # Errors
    ///
    /// Any directory that cannot be listed aborts the scan; no partial list is returned.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut rust_files = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.loop_ancestor().is_some() => {
                    warn!("Skipping symlink loop: {}", e);
                    continue;
                }
                Err(e) => match dangling_link(&e) {
                    Some(path) => {
                        // A dead link is not a directory; only a `.rs` name makes it a
                        // source file, which then fails to parse.
                        if has_source_suffix(path) {
                            rust_files.push(path.to_path_buf());
                        } else {
                            debug!("Ignoring dangling symlink: {}", path.display());
                        }
                        continue;
                    }
                    None => return Err(GenError::from(e)),
                },
            };

            let path = entry.path();
            if entry.file_type().is_file() && has_source_suffix(path) {
                debug!("Discovered source file: {}", path.display());
                rust_files.push(path.to_path_buf());
            }
        }

        Ok(rust_files)
    }
}

fn has_source_suffix(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(SOURCE_SUFFIX)
}

/// Path of a symlink whose target does not exist, if that is what `err` is about.
fn dangling_link(err: &walkdir::Error) -> Option<&Path> {
    let path = err.path()?;
    let not_found = err
        .io_error()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false);
    let is_link = std::fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);

    if not_found && is_link {
        Some(path)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[PathBuf], root: &std::path::Path) -> Vec<String> {
        files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_scan_normal_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("users.rs"), "pub fn a() {}").unwrap();
        fs::write(root.join("mod.rs"), "pub mod users;").unwrap();
        fs::write(root.join("readme.md"), "# README").unwrap();

        let files = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(names(&files, root), vec!["mod.rs", "users.rs"]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let files = FileScanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_nested_directories_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::write(root.join("a.rs"), "").unwrap();
        fs::write(root.join("b/inner/x.rs"), "").unwrap();
        fs::write(root.join("b/y.rs"), "").unwrap();
        fs::write(root.join("c.rs"), "").unwrap();

        let files = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(
            names(&files, root),
            vec!["a.rs", "b/inner/x.rs", "b/y.rs", "c.rs"]
        );
    }

    #[test]
    fn test_scan_does_not_skip_target_or_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("target")).unwrap();
        fs::create_dir(root.join(".hidden")).unwrap();
        fs::create_dir(root.join("vendor")).unwrap();
        fs::write(root.join("target/build.rs"), "").unwrap();
        fs::write(root.join(".hidden/secret.rs"), "").unwrap();
        fs::write(root.join("vendor/lib.rs"), "").unwrap();

        let files = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_scan_missing_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let result = FileScanner::new(missing).scan();

        assert!(matches!(result, Err(GenError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlink_loop() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("api")).unwrap();
        fs::write(root.join("api/users.rs"), "").unwrap();
        std::os::unix::fs::symlink(root, root.join("api/back")).unwrap();

        let files = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(names(&files, root), vec!["api/users.rs"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_ignores_dangling_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("target")).unwrap();
        fs::write(root.join("a.rs"), "").unwrap();
        std::os::unix::fs::symlink(root.join("gone"), root.join("dangling")).unwrap();
        std::os::unix::fs::symlink(root.join("gone"), root.join("target/stale")).unwrap();

        let files = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(names(&files, root), vec!["a.rs"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_keeps_dangling_source_link() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        std::os::unix::fs::symlink(root.join("gone.rs"), root.join("broken.rs")).unwrap();

        let files = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(names(&files, root), vec!["broken.rs"]);
    }
}
