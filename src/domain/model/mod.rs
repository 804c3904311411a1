// Domain models - Requests, provider items, candidates and render jobs

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Upper bound on same-term retries after a timeout
pub const MAX_RETRY_BUDGET: u32 = 3;

/// Per-attempt provider deadline used when the caller does not supply one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Frame rate of synthesized clips
pub const RENDER_FPS: u32 = 25;

/// Output size of synthesized clips
pub const RENDER_RESOLUTION: Resolution = Resolution {
    width: 1280,
    height: 720,
};

/// Default synthesized clip length in seconds
pub const DEFAULT_CLIP_DURATION: f64 = 3.0;

/// Default final zoom factor of a synthesized clip
pub const DEFAULT_MAX_ZOOM: f64 = 1.2;

/// Default number of images returned by an image search
pub const DEFAULT_IMAGE_COUNT: usize = 5;

/// Default number of items returned by a preview search
pub const DEFAULT_PREVIEW_COUNT: usize = 10;

/// Frame orientation requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Exact pixel size a qualifying item must have
    pub fn resolution(&self) -> Resolution {
        match self {
            Orientation::Portrait => Resolution::new(1080, 1920),
            Orientation::Landscape => Resolution::new(1920, 1080),
        }
    }

    /// Query parameter value understood by the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(DomainError::InvalidRequest(format!(
                "Invalid orientation: {}. Valid orientations: portrait, landscape",
                other
            ))),
        }
    }
}

/// Pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Format as `WxH` for ffmpeg size arguments
    pub fn to_ffmpeg_size(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Parameters of one video search call
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub terms: Vec<String>,
    pub min_duration_secs: f64,
    pub orientation: Orientation,
    pub exclude_ids: HashSet<String>,
    pub timeout: Duration,
    pub retry_budget: u32,
}

impl SearchRequest {
    /// Create a video search request with default orientation, timeout and retry budget
    pub fn new<I, S>(terms: I, min_duration_secs: f64) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms = clean_terms(terms);
        if !min_duration_secs.is_finite() || min_duration_secs < 0.0 {
            return Err(DomainError::InvalidRequest(format!(
                "Minimum duration must be a non-negative number of seconds, got {}",
                min_duration_secs
            )));
        }

        Ok(Self {
            terms,
            min_duration_secs,
            orientation: Orientation::default(),
            exclude_ids: HashSet::new(),
            timeout: DEFAULT_TIMEOUT,
            retry_budget: MAX_RETRY_BUDGET,
        })
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Identifiers that must never be returned (e.g. clips already used)
    pub fn with_exclusions<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, DomainError> {
        self.timeout = validate_timeout(timeout)?;
        Ok(self)
    }

    pub fn with_retry_budget(mut self, retry_budget: u32) -> Result<Self, DomainError> {
        self.retry_budget = validate_retry_budget(retry_budget)?;
        Ok(self)
    }
}

/// Parameters of one image search call
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub terms: Vec<String>,
    pub count: usize,
    pub orientation: Orientation,
    pub timeout: Duration,
    pub retry_budget: u32,
}

impl ImageRequest {
    /// Create an image search request; blank terms are dropped
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: clean_terms(terms),
            count: DEFAULT_IMAGE_COUNT,
            orientation: Orientation::default(),
            timeout: DEFAULT_TIMEOUT,
            retry_budget: MAX_RETRY_BUDGET,
        }
    }

    pub fn with_count(mut self, count: usize) -> Result<Self, DomainError> {
        if count == 0 {
            return Err(DomainError::InvalidRequest(
                "Image count must be at least 1".to_string(),
            ));
        }
        self.count = count;
        Ok(self)
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, DomainError> {
        self.timeout = validate_timeout(timeout)?;
        Ok(self)
    }

    pub fn with_retry_budget(mut self, retry_budget: u32) -> Result<Self, DomainError> {
        self.retry_budget = validate_retry_budget(retry_budget)?;
        Ok(self)
    }
}

fn clean_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    terms
        .into_iter()
        .map(Into::into)
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty())
        .collect()
}

fn validate_timeout(timeout: Duration) -> Result<Duration, DomainError> {
    if timeout.is_zero() {
        return Err(DomainError::InvalidRequest(
            "Timeout must be greater than zero".to_string(),
        ));
    }
    Ok(timeout)
}

fn validate_retry_budget(retry_budget: u32) -> Result<u32, DomainError> {
    if retry_budget > MAX_RETRY_BUDGET {
        return Err(DomainError::InvalidRequest(format!(
            "Retry budget {} exceeds the maximum of {}",
            retry_budget, MAX_RETRY_BUDGET
        )));
    }
    Ok(retry_budget)
}

/// Query sent to the provider's video catalog
#[derive(Debug, Clone, PartialEq)]
pub struct VideoQuery {
    pub term: String,
    /// `None` searches every orientation (preview search)
    pub orientation: Option<Orientation>,
    pub per_page: usize,
    pub timeout: Duration,
}

/// Query sent to the provider's photo catalog
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoQuery {
    pub term: String,
    pub orientation: Orientation,
    pub per_page: usize,
    pub timeout: Duration,
}

/// Video item as reported by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct RawVideo {
    pub id: String,
    /// Reported duration in seconds, before frame-rate normalization
    pub duration: f64,
    /// Thumbnail URL
    pub image: Option<String>,
    pub files: Vec<RawVideoFile>,
}

/// One encoded variant of a provider video
#[derive(Debug, Clone, PartialEq)]
pub struct RawVideoFile {
    pub quality: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub link: String,
}

/// Photo item as reported by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct RawPhoto {
    pub id: String,
    pub width: u32,
    pub height: u32,
    /// Original-size source URL
    pub url: String,
}

/// Kind of selected media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
}

/// A media item that passed every filter rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaCandidate {
    pub id: String,
    pub kind: MediaKind,
    pub url: String,
    pub width: u32,
    pub height: u32,
    /// Normalized duration in seconds (videos only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    /// Representative frame rate (videos only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
}

/// Lightweight search hit used to populate preview listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub id: String,
    pub image: Option<String>,
    pub url: Option<String>,
}

/// Fractional pan offsets relative to the source image size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOffsets {
    pub x_start: f64,
    pub y_start: f64,
    pub x_end: f64,
    pub y_end: f64,
}

/// Fixed pan paths used to animate a still image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trajectory {
    TopLeftToBottomRight,
    BottomRightToTopLeft,
    BottomLeftToTopRight,
    TopRightToBottomLeft,
    Vertical,
    Horizontal,
}

impl Trajectory {
    pub const ALL: [Trajectory; 6] = [
        Trajectory::TopLeftToBottomRight,
        Trajectory::BottomRightToTopLeft,
        Trajectory::BottomLeftToTopRight,
        Trajectory::TopRightToBottomLeft,
        Trajectory::Vertical,
        Trajectory::Horizontal,
    ];

    pub fn offsets(&self) -> PanOffsets {
        let (x_start, y_start, x_end, y_end) = match self {
            Trajectory::TopLeftToBottomRight => (0.0, 0.0, 0.3, 0.3),
            Trajectory::BottomRightToTopLeft => (0.3, 0.3, 0.0, 0.0),
            Trajectory::BottomLeftToTopRight => (0.0, 0.3, 0.3, 0.0),
            Trajectory::TopRightToBottomLeft => (0.3, 0.0, 0.0, 0.3),
            Trajectory::Vertical => (0.15, 0.0, 0.15, 0.3),
            Trajectory::Horizontal => (0.0, 0.15, 0.3, 0.15),
        };
        PanOffsets {
            x_start,
            y_start,
            x_end,
            y_end,
        }
    }
}

/// Everything needed to render one still image into a clip
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSpec {
    pub image_path: PathBuf,
    pub output_path: PathBuf,
    pub duration_secs: f64,
    pub max_zoom: f64,
    pub trajectory: Trajectory,
}

impl ClipSpec {
    /// Create clip spec with validation
    pub fn new(
        image_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        duration_secs: f64,
        max_zoom: f64,
        trajectory: Trajectory,
    ) -> Result<Self, DomainError> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(DomainError::InvalidRequest(format!(
                "Clip duration must be positive, got {}",
                duration_secs
            )));
        }
        if !max_zoom.is_finite() || max_zoom <= 1.0 {
            return Err(DomainError::InvalidRequest(format!(
                "Maximum zoom must be greater than 1.0, got {}",
                max_zoom
            )));
        }

        let spec = Self {
            image_path: image_path.into(),
            output_path: output_path.into(),
            duration_secs,
            max_zoom,
            trajectory,
        };
        if spec.frame_count() == 0 {
            return Err(DomainError::InvalidRequest(format!(
                "Clip duration {}s is shorter than one frame",
                duration_secs
            )));
        }
        Ok(spec)
    }

    /// Number of frames rendered at the fixed clip frame rate.
    ///
    /// Durations that are not a whole number of frames round to the nearest frame.
    pub fn frame_count(&self) -> u32 {
        (self.duration_secs * RENDER_FPS as f64).round() as u32
    }

    /// Output length in seconds, snapped to the rendered frame count so the
    /// trim and the zoompan step count agree
    pub fn rendered_secs(&self) -> f64 {
        self.frame_count() as f64 / RENDER_FPS as f64
    }
}

/// Ordered clips to concatenate into one output
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyJob {
    pub clips: Vec<PathBuf>,
    pub output_path: PathBuf,
}

impl AssemblyJob {
    pub fn new<I, P>(clips: I, output_path: impl Into<PathBuf>) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let clips: Vec<PathBuf> = clips.into_iter().map(Into::into).collect();
        if clips.is_empty() {
            return Err(DomainError::InvalidRequest(
                "At least one clip is required for assembly".to_string(),
            ));
        }
        Ok(Self {
            clips,
            output_path: output_path.into(),
        })
    }
}
