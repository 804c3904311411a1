//! Path helpers for render artifacts

use std::path::{Path, PathBuf};

use crate::domain::errors::DomainResult;

/// Path utilities for clip and manifest files
pub struct PathUtils;

impl PathUtils {
    /// Directory that holds `output`; `.` for bare file names
    pub fn output_dir(output: &Path) -> PathBuf {
        match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Absolute form of `path` without touching the filesystem.
    ///
    /// Concat manifests resolve relative entries against the manifest's own
    /// directory, so every entry is written absolute.
    pub fn absolute(path: &Path) -> DomainResult<PathBuf> {
        Ok(std::path::absolute(path)?)
    }

    /// Name of the `index`-th intermediate clip of a slideshow
    pub fn clip_file_name(index: usize) -> String {
        format!("clip_{:03}.mp4", index)
    }
}
