//! Text Signal Extraction — pure functions over strings.
//!
//! Keyword and regex heuristics only; no NLP models. Every function is
//! total: empty or unusable text yields an empty result, never an error.

pub mod domain;
pub mod experience;
pub mod skills;

pub use domain::extract_domain_keywords;
pub use experience::extract_years_of_experience;
pub use skills::extract_skills;
