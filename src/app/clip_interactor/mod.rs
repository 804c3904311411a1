// Clip interactor - Still-image animation and clip concatenation

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;
use crate::utils::{ConcatManifest, PathUtils};

/// Interactor for clip synthesis and assembly use cases
pub struct ClipInteractor {
    runner: Arc<dyn ToolRunnerPort>,
    rng: Mutex<StdRng>,
}

impl ClipInteractor {
    /// Create new clip interactor seeded from OS entropy
    pub fn new(runner: Arc<dyn ToolRunnerPort>) -> Self {
        Self {
            runner,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Create clip interactor with a fixed seed for reproducible trajectories
    pub fn with_seed(runner: Arc<dyn ToolRunnerPort>, seed: u64) -> Self {
        Self {
            runner,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn choose_trajectory(&self) -> Result<Trajectory, DomainError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| DomainError::Internal("random source lock poisoned".to_string()))?;
        Ok(ZoomPanPlanner::choose_trajectory(&mut *rng))
    }

    /// Animate one still image with a randomly chosen pan/zoom trajectory
    pub async fn synthesize_clip(
        &self,
        image_path: &Path,
        output_path: &Path,
        duration_secs: f64,
        max_zoom: f64,
    ) -> Result<ClipSpec, DomainError> {
        let trajectory = self.choose_trajectory()?;
        let spec = ClipSpec::new(image_path, output_path, duration_secs, max_zoom, trajectory)?;
        self.render_clip(&spec).await?;
        Ok(spec)
    }

    /// Render a fully specified clip
    pub async fn render_clip(&self, spec: &ClipSpec) -> Result<(), DomainError> {
        info!(
            image = %spec.image_path.display(),
            output = %spec.output_path.display(),
            duration = spec.duration_secs,
            trajectory = ?spec.trajectory,
            "Synthesizing clip"
        );

        let args = RenderCommands::zoom_pan_args(spec);
        self.run(&args).await
    }

    /// Concatenate clips in order without re-encoding.
    ///
    /// Every clip must share codec, resolution and frame rate. The manifest is
    /// removed whether or not the tool succeeds.
    pub async fn assemble_clips(&self, job: &AssemblyJob) -> Result<(), DomainError> {
        info!(
            clips = job.clips.len(),
            output = %job.output_path.display(),
            "Assembling clips"
        );

        let manifest = ConcatManifest::create(&job.output_path, &job.clips)?;
        debug!(manifest = %manifest.path().display(), "Wrote concat manifest");

        let args = RenderCommands::concat_args(manifest.path(), &job.output_path);
        let result = self.run(&args).await;

        if let Err(e) = manifest.close() {
            warn!(error = %e, "Failed to remove concat manifest");
        }
        result
    }

    /// Animate every image and join the clips in image order.
    ///
    /// Intermediate clips live in a temporary directory beside the output and
    /// are removed on every exit path.
    pub async fn render_slideshow(
        &self,
        images: &[PathBuf],
        output_path: &Path,
        duration_secs: f64,
        max_zoom: f64,
    ) -> Result<Vec<ClipSpec>, DomainError> {
        if images.is_empty() {
            return Err(DomainError::InvalidRequest(
                "At least one image is required for a slideshow".to_string(),
            ));
        }

        let work_dir = tempfile::Builder::new()
            .prefix("stockreel_clips_")
            .tempdir_in(PathUtils::output_dir(output_path))?;

        let mut specs = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            let clip_path = work_dir.path().join(PathUtils::clip_file_name(index));
            let spec = self
                .synthesize_clip(image, &clip_path, duration_secs, max_zoom)
                .await?;
            specs.push(spec);
        }

        let job = AssemblyJob::new(specs.iter().map(|s| s.output_path.clone()), output_path)?;
        self.assemble_clips(&job).await?;

        info!(
            clips = specs.len(),
            output = %output_path.display(),
            "Slideshow rendered"
        );
        Ok(specs)
    }

    async fn run(&self, args: &[String]) -> Result<(), DomainError> {
        let output = self.runner.run_tool(args).await?;
        if output.success() {
            return Ok(());
        }

        error!(
            tool = self.runner.tool_name(),
            status = ?output.status,
            "External tool failed"
        );
        Err(DomainError::RenderTool {
            tool: self.runner.tool_name().to_string(),
            status: output.status,
            stderr: output.stderr.trim().to_string(),
        })
    }
}
