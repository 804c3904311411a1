// Domain layer - Selection rules and media types

pub mod errors;
pub mod model;
pub mod rules;
