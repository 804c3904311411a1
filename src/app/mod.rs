// Application layer - Use case interactors

pub mod clip_interactor;
pub mod container;
pub mod search_interactor;

// Re-export interactors
pub use clip_interactor::ClipInteractor;
pub use container::{AppContainer, DefaultAppContainer};
pub use search_interactor::SearchInteractor;
