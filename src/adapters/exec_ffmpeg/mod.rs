//! FFmpeg execution adapter
//!
//! Runs the `ffmpeg` binary as a subprocess and captures its output.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// FFmpeg-based tool runner
#[derive(Debug, Clone)]
pub struct FfmpegToolAdapter {
    program: PathBuf,
}

impl Default for FfmpegToolAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegToolAdapter {
    /// Create adapter that resolves `ffmpeg` from PATH
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
        }
    }

    /// Use a specific binary name or path
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the configured program to an executable path
    pub fn locate(&self) -> Result<PathBuf, DomainError> {
        which::which(&self.program).map_err(|e| DomainError::RenderTool {
            tool: self.tool_name().to_string(),
            status: None,
            stderr: format!("{} not found: {}", self.program.display(), e),
        })
    }
}

#[async_trait]
impl ToolRunnerPort for FfmpegToolAdapter {
    fn tool_name(&self) -> &str {
        self.program
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("ffmpeg")
    }

    async fn run_tool(&self, args: &[String]) -> Result<ToolOutput, DomainError> {
        let program = self.locate()?;
        debug!("Running {} {}", program.display(), args.join(" "));

        let output = Command::new(&program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
