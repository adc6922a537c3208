//! Candidate–job matching core: keyword extraction, Jaccard match scoring,
//! and keyword-based job alerts.
//!
//! Two deliberately different text-matching algorithms live here. Match
//! scoring works on normalized, stopword-filtered keyword sets; alert
//! matching is raw case-insensitive substring containment. They are kept
//! separate on purpose and must not be unified.

pub mod alerts;
pub mod keywords;
pub mod score;

pub use score::match_score;
