//! Pan/zoom planning and ffmpeg argument construction
//!
//! Everything here is pure: the interactors hand the resulting argument
//! vectors to a [`crate::ports::ToolRunnerPort`].

use std::path::Path;

use rand::Rng;

use crate::domain::model::*;

/// Business rules for animating a still image
pub struct ZoomPanPlanner;

impl ZoomPanPlanner {
    /// Uniform choice among the fixed trajectories
    pub fn choose_trajectory<R: Rng + ?Sized>(rng: &mut R) -> Trajectory {
        Trajectory::ALL[rng.random_range(0..Trajectory::ALL.len())]
    }

    /// `zoompan` filter: zoom grows linearly from 1.0 to `max_zoom` while the
    /// crop window moves from the start offset to the end offset, one step per frame.
    pub fn filter_expression(spec: &ClipSpec) -> String {
        let frames = spec.frame_count();
        let zoom_start = 1.0_f64;
        let zoom_end = spec.max_zoom;
        let o = spec.trajectory.offsets();

        format!(
            "zoompan=z='{zs}+(on/{f})*({ze}-{zs})':x='iw*{xs}+on*(iw*({xe}-{xs})/{f})':y='ih*{ys}+on*(ih*({ye}-{ys})/{f})':d={f}:s={size}",
            zs = zoom_start,
            ze = zoom_end,
            xs = o.x_start,
            xe = o.x_end,
            ys = o.y_start,
            ye = o.y_end,
            f = frames,
            size = RENDER_RESOLUTION.to_ffmpeg_size(),
        )
    }
}

/// Argument vectors for the external rendering tool
pub struct RenderCommands;

impl RenderCommands {
    /// Render a still image into a constant-frame-rate clip
    pub fn zoom_pan_args(spec: &ClipSpec) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-i".to_string(),
            path_arg(&spec.image_path),
            "-vf".to_string(),
            ZoomPanPlanner::filter_expression(spec),
            "-t".to_string(),
            format_seconds(spec.rendered_secs()),
            "-r".to_string(),
            RENDER_FPS.to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            path_arg(&spec.output_path),
        ]
    }

    /// Stream-copy every clip listed in a concat manifest into one file
    pub fn concat_args(manifest: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            path_arg(manifest),
            "-c".to_string(),
            "copy".to_string(),
            path_arg(output),
        ]
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn format_seconds(seconds: f64) -> String {
    format!("{:.3}", seconds)
}
