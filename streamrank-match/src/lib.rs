//! Title matching for streamrank.
//!
//! Turns a noisy scraped title into a canonical form, scores catalog
//! candidates against it, and picks a confident match (or none).

pub mod engine;
pub mod normalize;
pub mod relevance;
pub mod similarity;

pub use engine::{MatchEngine, is_accepted, match_candidates, score_candidate};
pub use normalize::{NormalizedTitle, normalize};
pub use relevance::relevance;
pub use similarity::{similarity, title_similarity};
