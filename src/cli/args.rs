//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;
use clap_num::number_range;

use crate::domain::model::{Orientation, MAX_RETRY_BUDGET};

const MAX_PAGE_COUNT: usize = 80;

fn retry_budget(s: &str) -> Result<u32, String> {
    number_range(s, 0, MAX_RETRY_BUDGET)
}

fn item_count(s: &str) -> Result<usize, String> {
    number_range(s, 1, MAX_PAGE_COUNT)
}

fn timeout_ms(s: &str) -> Result<u64, String> {
    number_range(s, 1, u64::MAX)
}

/// Provider call tuning shared by the search commands
#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Per-attempt deadline in milliseconds (overrides config)
    #[arg(long, value_parser = timeout_ms)]
    pub timeout_ms: Option<u64>,

    /// Same-term retries after a timeout, 0-3 (overrides config)
    #[arg(long, value_parser = retry_budget)]
    pub retries: Option<u32>,
}

/// Arguments for the video command
#[derive(Args, Debug)]
pub struct VideoArgs {
    /// Search term, in priority order (repeatable)
    #[arg(short, long = "term", required = true)]
    pub terms: Vec<String>,

    /// Minimum clip length in seconds
    #[arg(short, long, default_value_t = 0.0)]
    pub min_duration: f64,

    /// Frame orientation
    #[arg(long, default_value = "portrait")]
    pub orientation: Orientation,

    /// Provider id to skip (repeatable)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    #[command(flatten)]
    pub probe: ProbeArgs,
}

/// Arguments for the images command
#[derive(Args, Debug)]
pub struct ImagesArgs {
    /// Search term, in priority order (repeatable)
    #[arg(short, long = "term", required = true)]
    pub terms: Vec<String>,

    /// Number of images to return (1-80)
    #[arg(short, long, default_value_t = 5, value_parser = item_count)]
    pub count: usize,

    /// Frame orientation
    #[arg(long, default_value = "portrait")]
    pub orientation: Orientation,

    #[command(flatten)]
    pub probe: ProbeArgs,
}

/// Arguments for the preview command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Search term
    #[arg(short, long)]
    pub term: String,

    /// Number of items to list (1-80)
    #[arg(short, long, default_value_t = 10, value_parser = item_count)]
    pub count: usize,
}

/// Arguments for the animate command
#[derive(Args, Debug)]
pub struct AnimateArgs {
    /// Still image to animate
    #[arg(short, long)]
    pub image: PathBuf,

    /// Output clip path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Clip length in seconds
    #[arg(short, long, default_value_t = 3.0)]
    pub duration: f64,

    /// Final zoom factor (must exceed 1.0)
    #[arg(long, default_value_t = 1.2)]
    pub max_zoom: f64,
}

/// Arguments for the concat command
#[derive(Args, Debug)]
pub struct ConcatArgs {
    /// Clip to append, in playback order (repeatable)
    #[arg(short, long = "clip", required = true)]
    pub clips: Vec<PathBuf>,

    /// Output video path
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the slideshow command
#[derive(Args, Debug)]
pub struct SlideshowArgs {
    /// Image to include, in playback order (repeatable)
    #[arg(short, long = "image", required = true)]
    pub images: Vec<PathBuf>,

    /// Output video path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Length of each image's clip in seconds
    #[arg(short, long, default_value_t = 3.0)]
    pub duration: f64,

    /// Final zoom factor (must exceed 1.0)
    #[arg(long, default_value_t = 1.2)]
    pub max_zoom: f64,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::cli::{Cli, Commands};
    use crate::domain::model::Orientation;

    #[test]
    fn test_video_args_parse() {
        let cli = Cli::try_parse_from([
            "stockreel", "video", "-t", "forest", "-t", "lake", "--min-duration", "10",
            "--orientation", "landscape", "--exclude", "42", "--retries", "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Video(args) => {
                assert_eq!(args.terms, vec!["forest", "lake"]);
                assert_eq!(args.min_duration, 10.0);
                assert_eq!(args.orientation, Orientation::Landscape);
                assert_eq!(args.exclude, vec!["42"]);
                assert_eq!(args.probe.retries, Some(2));
                assert_eq!(args.probe.timeout_ms, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_retry_budget_is_bounded() {
        let result = Cli::try_parse_from(["stockreel", "video", "-t", "forest", "--retries", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Cli::try_parse_from(["stockreel", "video", "-t", "forest", "--timeout-ms", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_image_count_bounds() {
        assert!(Cli::try_parse_from(["stockreel", "images", "-t", "sky", "-c", "0"]).is_err());
        assert!(Cli::try_parse_from(["stockreel", "images", "-t", "sky", "-c", "81"]).is_err());

        let cli = Cli::try_parse_from(["stockreel", "images", "-t", "sky"]).unwrap();
        match cli.command {
            Commands::Images(args) => {
                assert_eq!(args.count, 5);
                assert_eq!(args.orientation, Orientation::Portrait);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_orientation_rejected() {
        let result = Cli::try_parse_from(["stockreel", "video", "-t", "forest", "--orientation", "square"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_slideshow_args_keep_image_order() {
        let cli = Cli::try_parse_from([
            "stockreel", "slideshow", "-i", "b.jpg", "-i", "a.jpg", "-o", "out.mp4",
        ])
        .unwrap();

        match cli.command {
            Commands::Slideshow(args) => {
                assert_eq!(args.images, vec![std::path::PathBuf::from("b.jpg"), "a.jpg".into()]);
                assert_eq!(args.duration, 3.0);
                assert_eq!(args.max_zoom, 1.2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
