// Search interactor - Drives the provider through the probe sequence

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Items requested per provider page (the provider's maximum)
pub const PROVIDER_PAGE_SIZE: usize = 80;

/// Interactor for stock media search use cases
pub struct SearchInteractor {
    provider: Arc<dyn MediaProviderPort>,
    rng: Mutex<StdRng>,
}

/// Probe parameters shared by video and image searches
#[derive(Debug, Clone, Copy)]
struct ProbePolicy {
    orientation: Orientation,
    timeout: Duration,
    retry_budget: u32,
}

impl SearchInteractor {
    /// Create new search interactor seeded from OS entropy
    pub fn new(provider: Arc<dyn MediaProviderPort>) -> Self {
        Self {
            provider,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Create search interactor with a fixed seed for reproducible choices
    pub fn with_seed(provider: Arc<dyn MediaProviderPort>, seed: u64) -> Self {
        Self {
            provider,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn rng(&self) -> Result<MutexGuard<'_, StdRng>, DomainError> {
        self.rng
            .lock()
            .map_err(|_| DomainError::Internal("random source lock poisoned".to_string()))
    }

    /// Find one video satisfying the request, chosen at random among the
    /// qualifying results of the first productive term
    pub async fn find_video(&self, request: &SearchRequest) -> Result<MediaCandidate, DomainError> {
        info!(
            terms = ?request.terms,
            min_duration = request.min_duration_secs,
            orientation = %request.orientation,
            "Searching for video"
        );

        let provider = self.provider.as_ref();
        let exclude_ids = &request.exclude_ids;
        let min_duration = request.min_duration_secs;
        let orientation = request.orientation;
        let timeout = request.timeout;

        let policy = ProbePolicy {
            orientation,
            timeout,
            retry_budget: request.retry_budget,
        };

        let (term, qualifying) = self
            .probe_terms(&request.terms, policy, move |term| async move {
                let query = VideoQuery {
                    term,
                    orientation: Some(orientation),
                    per_page: PROVIDER_PAGE_SIZE,
                    timeout,
                };
                let videos = provider.search_videos(&query).await?;
                Ok::<_, DomainError>(CandidateFilter::qualify_videos(
                    &videos,
                    exclude_ids,
                    min_duration,
                    orientation,
                ))
            })
            .await?;

        let video = MediaSelector::pick(&qualifying, &mut *self.rng()?)
            .cloned()
            .ok_or_else(|| DomainError::Internal("qualifying set was empty".to_string()))?;

        info!(
            term = %term,
            id = %video.id,
            candidates = qualifying.len(),
            "Found video"
        );
        Ok(video)
    }

    /// Find up to `count` images from the first term with matching photos
    pub async fn find_images(&self, request: &ImageRequest) -> Result<Vec<MediaCandidate>, DomainError> {
        info!(
            terms = ?request.terms,
            count = request.count,
            orientation = %request.orientation,
            "Searching for images"
        );

        let provider = self.provider.as_ref();
        let orientation = request.orientation;
        let timeout = request.timeout;
        let no_exclusions = HashSet::new();
        let no_exclusions = &no_exclusions;

        let policy = ProbePolicy {
            orientation,
            timeout,
            retry_budget: request.retry_budget,
        };

        let (term, qualifying) = self
            .probe_terms(&request.terms, policy, move |term| async move {
                let query = PhotoQuery {
                    term,
                    orientation,
                    per_page: PROVIDER_PAGE_SIZE,
                    timeout,
                };
                let photos = provider.search_photos(&query).await?;
                Ok::<_, DomainError>(CandidateFilter::qualify_photos(
                    &photos,
                    no_exclusions,
                    orientation,
                ))
            })
            .await?;

        let available = qualifying.len();
        let images = MediaSelector::sample(qualifying, request.count, &mut *self.rng()?);

        info!(
            term = %term,
            returned = images.len(),
            available,
            "Found images"
        );
        Ok(images)
    }

    /// Unfiltered preview listing for a single term
    pub async fn preview_videos(&self, term: &str, count: usize) -> Result<Vec<PreviewItem>, DomainError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(DomainError::InvalidRequest(
                "Preview search term cannot be empty".to_string(),
            ));
        }
        if count == 0 {
            return Err(DomainError::InvalidRequest(
                "Preview count must be at least 1".to_string(),
            ));
        }
        debug!(term, count, "Searching for videos for preview");

        let query = VideoQuery {
            term: term.to_string(),
            orientation: None,
            per_page: count.min(PROVIDER_PAGE_SIZE),
            timeout: DEFAULT_TIMEOUT,
        };
        let videos = self.provider.search_videos(&query).await?;

        Ok(videos.iter().map(CandidateFilter::preview_item).collect())
    }

    /// Probe terms strictly in scheduler order until one yields a non-empty
    /// qualifying set.
    ///
    /// A timeout re-issues the same term up to `retry_budget` more times and is
    /// fatal after that. Other non-fatal failures advance to the next term.
    async fn probe_terms<T, F, Fut>(
        &self,
        caller_terms: &[String],
        policy: ProbePolicy,
        mut probe: F,
    ) -> Result<(String, Vec<T>), DomainError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<Vec<T>, DomainError>>,
    {
        let order = {
            let mut rng = self.rng()?;
            TermScheduler::probe_order(caller_terms, &mut *rng)
        };
        debug!(order = ?order, "Probe order");

        for term in &order {
            let mut attempt: u32 = 0;

            loop {
                attempt += 1;

                let outcome = match tokio::time::timeout(policy.timeout, probe(term.clone())).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(DomainError::Timeout {
                        term: term.clone(),
                        orientation: policy.orientation,
                        attempts: attempt,
                    }),
                };

                match outcome {
                    Ok(qualifying) if !qualifying.is_empty() => {
                        debug!(term = %term, attempt, candidates = qualifying.len(), "Term qualified");
                        return Ok((term.clone(), qualifying));
                    }
                    Ok(_) => {
                        debug!(term = %term, "No qualifying media for term");
                        break;
                    }
                    Err(e) if e.is_timeout() => {
                        if attempt <= policy.retry_budget {
                            warn!(term = %term, attempt, "Timeout error, retrying...");
                            continue;
                        }
                        error!(term = %term, attempt, "Timeout error, retry limit reached");
                        return Err(DomainError::Timeout {
                            term: term.clone(),
                            orientation: policy.orientation,
                            attempts: attempt,
                        });
                    }
                    Err(e) if e.is_fatal() => {
                        error!(term = %term, error = %e, "Search aborted");
                        return Err(e);
                    }
                    Err(e) => {
                        warn!(term = %term, error = %e, "Provider error, trying next term");
                        break;
                    }
                }
            }
        }

        error!(
            terms = ?caller_terms,
            orientation = %policy.orientation,
            "No media found for the given terms"
        );
        Err(DomainError::NoResults {
            terms: caller_terms.to_vec(),
            orientation: policy.orientation,
        })
    }
}
