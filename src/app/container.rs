use std::sync::Arc;

use crate::adapters::{AppConfig, FfmpegToolAdapter, PexelsAdapter};
use crate::app::{clip_interactor::ClipInteractor, search_interactor::SearchInteractor};
use crate::domain::errors::DomainError;
use crate::ports::{MediaProviderPort, ToolRunnerPort};

pub trait AppContainer: Send + Sync {
    fn search_interactor(&self) -> Arc<SearchInteractor>;
    fn clip_interactor(&self) -> Arc<ClipInteractor>;
}

pub struct DefaultAppContainer {
    search_interactor: Arc<SearchInteractor>,
    clip_interactor: Arc<ClipInteractor>,
}

impl DefaultAppContainer {
    /// Wire the production adapters from configuration
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let provider = Arc::new(
            PexelsAdapter::new(config.provider.api_key.clone())?
                .with_base_url(config.provider.base_url.clone()),
        );
        let runner = Arc::new(FfmpegToolAdapter::with_program(
            config.render.ffmpeg_path.clone(),
        ));

        Ok(Self::with_ports(provider, runner))
    }

    /// Wire arbitrary port implementations
    pub fn with_ports(
        provider: Arc<dyn MediaProviderPort>,
        runner: Arc<dyn ToolRunnerPort>,
    ) -> Self {
        Self {
            search_interactor: Arc::new(SearchInteractor::new(provider)),
            clip_interactor: Arc::new(ClipInteractor::new(runner)),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn search_interactor(&self) -> Arc<SearchInteractor> {
        Arc::clone(&self.search_interactor)
    }

    fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }
}
