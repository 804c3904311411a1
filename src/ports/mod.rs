// Ports - Interface definitions (contracts)

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for the stock media catalog
///
/// Implementations return the provider's items unfiltered; qualification
/// happens in the domain rules.
#[async_trait]
pub trait MediaProviderPort: Send + Sync {
    /// Search the video catalog for one term
    async fn search_videos(&self, query: &VideoQuery) -> Result<Vec<RawVideo>, DomainError>;

    /// Search the photo catalog for one term
    async fn search_photos(&self, query: &PhotoQuery) -> Result<Vec<RawPhoto>, DomainError>;
}

/// Captured result of one external tool run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Check if the tool exited with status zero
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Port for invoking the external rendering tool
#[async_trait]
pub trait ToolRunnerPort: Send + Sync {
    /// Name used in diagnostics (e.g. `ffmpeg`)
    fn tool_name(&self) -> &str;

    /// Run the tool to completion with the given arguments.
    ///
    /// A non-zero exit is reported through [`ToolOutput::status`], not as an
    /// error; `Err` means the process could not be started at all.
    async fn run_tool(&self, args: &[String]) -> Result<ToolOutput, DomainError>;
}
