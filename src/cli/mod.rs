//! CLI module for stockreel
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// Stock footage search and still-image slideshow rendering
///
/// Searches the Pexels catalog for portrait or landscape media and turns
/// still images into pan/zoom clips with ffmpeg.
#[derive(Parser, Debug)]
#[command(name = "stockreel")]
#[command(about = "Find stock footage and render pan/zoom slideshows")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./stockreel.toml when present)
    #[arg(long, env = "STOCKREEL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Pexels API key
    #[arg(long, env = "PEXELS_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find one stock video for the given terms
    Video(args::VideoArgs),
    /// Find stock images for the given terms
    Images(args::ImagesArgs),
    /// List unfiltered preview thumbnails for a term
    Preview(args::PreviewArgs),
    /// Animate a still image into a pan/zoom clip
    Animate(args::AnimateArgs),
    /// Join clips into one video without re-encoding
    Concat(args::ConcatArgs),
    /// Animate several images and join them into one video
    Slideshow(args::SlideshowArgs),
}
