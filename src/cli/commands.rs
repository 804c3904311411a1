//! Command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::adapters::AppConfig;
use crate::app::AppContainer;
use crate::cli::args::{
    AnimateArgs, ConcatArgs, ImagesArgs, PreviewArgs, ProbeArgs, SlideshowArgs, VideoArgs,
};
use crate::domain::model::{AssemblyJob, ImageRequest, SearchRequest};

/// Execute the video command
pub async fn video(container: &dyn AppContainer, config: &AppConfig, args: VideoArgs) -> Result<()> {
    let (timeout, retry_budget) = probe_settings(config, &args.probe);

    let request = SearchRequest::new(args.terms, args.min_duration)?
        .with_orientation(args.orientation)
        .with_exclusions(args.exclude)
        .with_timeout(timeout)?
        .with_retry_budget(retry_budget)?;

    let video = container
        .search_interactor()
        .find_video(&request)
        .await
        .context("Video search failed")?;

    print_json(&video)
}

/// Execute the images command
pub async fn images(container: &dyn AppContainer, config: &AppConfig, args: ImagesArgs) -> Result<()> {
    let (timeout, retry_budget) = probe_settings(config, &args.probe);

    let request = ImageRequest::new(args.terms)
        .with_count(args.count)?
        .with_orientation(args.orientation)
        .with_timeout(timeout)?
        .with_retry_budget(retry_budget)?;

    let images = container
        .search_interactor()
        .find_images(&request)
        .await
        .context("Image search failed")?;

    print_json(&images)
}

/// Execute the preview command
pub async fn preview(container: &dyn AppContainer, args: PreviewArgs) -> Result<()> {
    let items = container
        .search_interactor()
        .preview_videos(&args.term, args.count)
        .await
        .context("Preview search failed")?;

    print_json(&items)
}

/// Execute the animate command
pub async fn animate(container: &dyn AppContainer, args: AnimateArgs) -> Result<()> {
    let spec = container
        .clip_interactor()
        .synthesize_clip(&args.image, &args.output, args.duration, args.max_zoom)
        .await
        .with_context(|| format!("Failed to animate {}", args.image.display()))?;

    info!(output = %spec.output_path.display(), "Clip written");
    print_json(&json!({
        "output": spec.output_path,
        "trajectory": spec.trajectory,
        "duration_secs": spec.duration_secs,
        "frames": spec.frame_count(),
    }))
}

/// Execute the concat command
pub async fn concat(container: &dyn AppContainer, args: ConcatArgs) -> Result<()> {
    let job = AssemblyJob::new(args.clips, args.output)?;

    container
        .clip_interactor()
        .assemble_clips(&job)
        .await
        .context("Failed to concatenate clips")?;

    print_json(&json!({
        "output": job.output_path,
        "clips": job.clips.len(),
    }))
}

/// Execute the slideshow command
pub async fn slideshow(container: &dyn AppContainer, args: SlideshowArgs) -> Result<()> {
    let specs = container
        .clip_interactor()
        .render_slideshow(&args.images, &args.output, args.duration, args.max_zoom)
        .await
        .context("Failed to render slideshow")?;

    let trajectories: Vec<_> = specs.iter().map(|s| s.trajectory).collect();
    print_json(&json!({
        "output": args.output,
        "clips": specs.len(),
        "trajectories": trajectories,
    }))
}

fn probe_settings(config: &AppConfig, probe: &ProbeArgs) -> (std::time::Duration, u32) {
    let timeout = probe
        .timeout_ms
        .map(std::time::Duration::from_millis)
        .unwrap_or_else(|| config.provider.timeout());
    let retry_budget = probe.retries.unwrap_or(config.provider.retry_budget);
    (timeout, retry_budget)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", rendered);
    Ok(())
}
