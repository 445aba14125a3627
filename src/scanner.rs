use anyhow::{bail, Result};
use log::{debug, warn};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Collects the Rust sources that make up a target library.
///
/// A target is either a single `.rs` file or a project directory. Directories are walked
/// recursively, skipping `target` and hidden directories.
///
/// # Example
///
/// ```no_run
/// use mvc_routes::scanner::SourceScanner;
/// use std::path::PathBuf;
///
/// let scanner = SourceScanner::new(PathBuf::from("./my-app"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} source files", result.source_files.len());
/// ```
pub struct SourceScanner {
    target: PathBuf,
}

/// Result of a scan.
#[derive(Debug)]
pub struct ScanResult {
    /// Every discovered `.rs` file, in walk order
    pub source_files: Vec<PathBuf>,
    /// Paths that could not be read while walking
    pub warnings: Vec<String>,
}

impl SourceScanner {
    pub fn new(target: PathBuf) -> Self {
        Self { target }
    }

    /// Scans the target and collects all `.rs` files.
    ///
    /// Unreadable entries below the root are recorded as warnings and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the target does not exist, or is a file without the `.rs` extension.
    pub fn scan(&self) -> Result<ScanResult> {
        if !self.target.exists() {
            bail!("Target does not exist: {}", self.target.display());
        }

        if self.target.is_file() {
            if !is_rust_source(&self.target) {
                bail!("Target is not a Rust source file: {}", self.target.display());
            }
            debug!("Target is a single source file: {}", self.target.display());
            return Ok(ScanResult {
                source_files: vec![self.target.clone()],
                warnings: Vec::new(),
            });
        }

        let mut source_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.target)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.path() == self.target {
                    return true;
                }

                let file_name = e.file_name().to_string_lossy();
                !file_name.starts_with('.') && file_name != "target"
            })
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && is_rust_source(path) {
                        source_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        debug!(
            "Scanned {}: {} source files",
            self.target.display(),
            source_files.len()
        );

        Ok(ScanResult {
            source_files,
            warnings,
        })
    }
}

fn is_rust_source(path: &std::path::Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("rs")
}
