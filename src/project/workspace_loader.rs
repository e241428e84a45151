//! Recursive workspace scanning.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::ide::AnalysisHost;

/// File extension of IOP sources.
pub const IOP_EXTENSION: &str = "iop";

/// Error starting a workspace scan.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Summary of one workspace scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Files successfully indexed.
    pub files_indexed: usize,
    /// Files that could not be read and were skipped.
    pub files_skipped: usize,
    /// Total symbols in the index after the scan.
    pub symbols: usize,
}

/// Finds and indexes IOP files under workspace roots.
///
/// Scanning is explicit: the owner of the workspace-folder list calls
/// [`WorkspaceLoader::load_directory`] once per root at startup and again
/// when it wants a re-scan. Nothing is watched.
#[derive(Debug, Default)]
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Recursively index every `.iop` file under `root` into `host`.
    ///
    /// Unreadable files and unwalkable directories are logged and skipped;
    /// only a missing root fails the scan.
    pub fn load_directory(
        &self,
        root: &Path,
        host: &mut AnalysisHost,
    ) -> Result<ScanReport, LoadError> {
        if !root.is_dir() {
            return Err(LoadError::NotADirectory(root.to_owned()));
        }

        let mut report = ScanReport::default();
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable directory entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(IOP_EXTENSION) {
                continue;
            }
            match host.index_file(path) {
                Ok(_) => report.files_indexed += 1,
                Err(_) => report.files_skipped += 1,
            }
        }

        report.symbols = host.index().len();
        info!(
            "indexed {} symbols from {} files under {} ({} skipped)",
            report.symbols,
            report.files_indexed,
            root.display(),
            report.files_skipped,
        );
        Ok(report)
    }
}
