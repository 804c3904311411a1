//! Concat manifest for the ffmpeg concat demuxer

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;

use crate::domain::errors::DomainResult;
use crate::utils::path::PathUtils;

/// Transient list of clips, removed when dropped or closed
#[derive(Debug)]
pub struct ConcatManifest {
    file: NamedTempFile,
}

impl ConcatManifest {
    /// Write a manifest next to `output`.
    ///
    /// The file name carries a millisecond timestamp (plus tempfile's random
    /// suffix) so concurrent assemblies into one directory never collide.
    pub fn create(output: &Path, clips: &[PathBuf]) -> DomainResult<Self> {
        let content = Self::render(clips)?;
        let token = Utc::now().format("%Y%m%d%H%M%S%3f");

        let mut file = tempfile::Builder::new()
            .prefix(&format!("concat_{}_", token))
            .suffix(".txt")
            .tempfile_in(PathUtils::output_dir(output))?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        Ok(Self { file })
    }

    /// One `file '<path>'` line per clip, in order
    pub fn render(clips: &[PathBuf]) -> DomainResult<String> {
        let mut lines = Vec::with_capacity(clips.len());
        for clip in clips {
            let absolute = PathUtils::absolute(clip)?;
            lines.push(format!("file '{}'", escape(&absolute.to_string_lossy())));
        }
        Ok(lines.join("\n"))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the manifest, reporting removal errors
    pub fn close(self) -> std::io::Result<()> {
        self.file.close()
    }
}

// concat demuxer quoting: a literal ' becomes '\''
fn escape(path: &str) -> String {
    path.replace('\'', r"'\''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_orders_and_quotes() {
        let clips = vec![PathBuf::from("/clips/b.mp4"), PathBuf::from("/clips/it's.mp4")];
        let content = ConcatManifest::render(&clips).unwrap();
        assert_eq!(content, "file '/clips/b.mp4'\nfile '/clips/it'\\''s.mp4'");
    }

    #[test]
    fn test_manifest_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp4");
        let manifest = ConcatManifest::create(&output, &[PathBuf::from("/clips/a.mp4")]).unwrap();

        let path = manifest.path().to_path_buf();
        assert_eq!(path.parent().unwrap(), dir.path());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("concat_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "file '/clips/a.mp4'");

        manifest.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_manifest_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let manifest =
                ConcatManifest::create(&dir.path().join("out.mp4"), &[PathBuf::from("/a.mp4")])
                    .unwrap();
            manifest.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
