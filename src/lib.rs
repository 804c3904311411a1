//! stockreel library
//!
//! Stock footage search against the Pexels catalog and still-image slideshow
//! rendering through ffmpeg.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, ClipInteractor, DefaultAppContainer, SearchInteractor};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::model::{
    AssemblyJob, ClipSpec, ImageRequest, MediaCandidate, MediaKind, Orientation, PreviewItem,
    SearchRequest, Trajectory,
};
pub use ports::{MediaProviderPort, ToolOutput, ToolRunnerPort};
