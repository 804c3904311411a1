// Domain rules - Term ordering, candidate qualification and random choice

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::model::*;

pub mod render;

pub use render::{RenderCommands, ZoomPanPlanner};

/// Generic terms probed only after every caller term came back empty
pub const JOKER_TERMS: [&str; 4] = ["nature", "globe", "space", "ocean"];

/// Extra seconds a video must exceed the requested minimum by, so trimming still fits
pub const DURATION_BUFFER_SECS: f64 = 3.0;

/// Frame rate the provider's reported durations are normalized against
pub const REFERENCE_FPS: f64 = 25.0;

/// Quality tag of the only acceptable video variants
pub const REQUIRED_QUALITY: &str = "hd";

/// Business rules for probe ordering
pub struct TermScheduler;

impl TermScheduler {
    /// Caller terms in random order, then joker terms in random order.
    ///
    /// Duplicates are dropped so no term is probed twice in one call, and a
    /// joker term the caller already supplied keeps its caller position.
    pub fn probe_order<R: Rng + ?Sized>(caller_terms: &[String], rng: &mut R) -> Vec<String> {
        let mut seen = HashSet::new();

        let mut caller: Vec<String> = caller_terms
            .iter()
            .filter(|term| seen.insert(term.as_str().to_string()))
            .cloned()
            .collect();
        caller.shuffle(rng);

        let mut jokers: Vec<String> = JOKER_TERMS
            .iter()
            .filter(|term| seen.insert(term.to_string()))
            .map(|term| term.to_string())
            .collect();
        jokers.shuffle(rng);

        caller.extend(jokers);
        caller
    }
}

/// Business rules for deciding which provider items qualify
pub struct CandidateFilter;

impl CandidateFilter {
    /// Correct the provider's duration for clips recorded below the reference frame rate.
    ///
    /// A missing frame rate leaves the reported duration unchanged.
    pub fn normalized_duration(reported_secs: f64, fps: Option<f64>) -> f64 {
        match fps {
            Some(fps) if fps < REFERENCE_FPS => reported_secs * (fps / REFERENCE_FPS),
            _ => reported_secs,
        }
    }

    /// Qualifying subset of one term's video results, in provider order
    pub fn qualify_videos(
        videos: &[RawVideo],
        exclude_ids: &HashSet<String>,
        min_duration_secs: f64,
        orientation: Orientation,
    ) -> Vec<MediaCandidate> {
        let required = orientation.resolution();

        videos
            .iter()
            .filter_map(|video| {
                if exclude_ids.contains(&video.id) {
                    return None;
                }
                let representative = video.files.first()?;

                let duration = Self::normalized_duration(video.duration, representative.fps);
                if duration < min_duration_secs + DURATION_BUFFER_SECS {
                    return None;
                }

                // First exact match wins; provider variant order is taken as stable
                let file = video.files.iter().find(|file| {
                    file.quality.as_deref() == Some(REQUIRED_QUALITY)
                        && file.width == Some(required.width)
                        && file.height == Some(required.height)
                })?;

                Some(MediaCandidate {
                    id: video.id.clone(),
                    kind: MediaKind::Video,
                    url: file.link.clone(),
                    width: required.width,
                    height: required.height,
                    duration_secs: Some(duration),
                    fps: representative.fps,
                })
            })
            .collect()
    }

    /// Qualifying subset of one term's photo results, in provider order
    pub fn qualify_photos(
        photos: &[RawPhoto],
        exclude_ids: &HashSet<String>,
        orientation: Orientation,
    ) -> Vec<MediaCandidate> {
        let required = orientation.resolution();

        photos
            .iter()
            .filter(|photo| !exclude_ids.contains(&photo.id))
            .filter(|photo| photo.width == required.width && photo.height == required.height)
            .map(|photo| MediaCandidate {
                id: photo.id.clone(),
                kind: MediaKind::Image,
                url: photo.url.clone(),
                width: photo.width,
                height: photo.height,
                duration_secs: None,
                fps: None,
            })
            .collect()
    }

    /// Preview entry for a video: first `hd` variant, else the first variant
    pub fn preview_item(video: &RawVideo) -> PreviewItem {
        let url = video
            .files
            .iter()
            .find(|file| file.quality.as_deref() == Some(REQUIRED_QUALITY))
            .or_else(|| video.files.first())
            .map(|file| file.link.clone());

        PreviewItem {
            id: video.id.clone(),
            image: video.image.clone(),
            url,
        }
    }
}

/// Business rules for choosing among qualifying candidates
pub struct MediaSelector;

impl MediaSelector {
    /// Pick one element with uniform probability; `None` only for an empty slice
    pub fn pick<'a, T, R: Rng + ?Sized>(candidates: &'a [T], rng: &mut R) -> Option<&'a T> {
        if candidates.is_empty() {
            return None;
        }
        let index = rng.random_range(0..candidates.len());
        candidates.get(index)
    }

    /// Up to `count` elements in random order
    pub fn sample<T, R: Rng + ?Sized>(mut candidates: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
        candidates.shuffle(rng);
        candidates.truncate(count);
        candidates
    }
}
