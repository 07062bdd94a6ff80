pub mod entity;
pub mod invariants;

pub use entity::{Movie, MovieMetadata, VOTER_PREVIEW_LIMIT};
pub use invariants::validate_movie;
