// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod pexels_http;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::FfmpegToolAdapter;
pub use pexels_http::PexelsAdapter;
pub use toml_config::AppConfig;
pub use tracing_log::init_logging;
