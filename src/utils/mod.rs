//! Common utilities and helpers

pub mod manifest;
pub mod path;

pub use manifest::ConcatManifest;
pub use path::PathUtils;
