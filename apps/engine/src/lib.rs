//! Hybrid Scoring & Multi-Judge Consensus Engine.
//!
//! Produces a defensible fit score for a job candidate by combining
//! deterministic text heuristics (skills, experience, project complexity,
//! domain relevance) with a qualitative adjustment from one or more LLM
//! judges, then reconciles independent judge reports into a single
//! consensus report with an explainable audit trail.
//!
//! The embedding service owns HTTP, persistence, and document extraction;
//! this crate takes already-normalized text and repository metadata via
//! [`Analyzer::analyze`] and returns a report or a structured error. Every
//! scorer and the combiner are also exposed as pure, directly callable
//! functions for isolated testing and tuning.

pub mod analyzer;
pub mod backends;
pub mod cache;
pub mod config;
pub mod consensus;
pub mod errors;
pub mod extraction;
pub mod judges;
pub mod models;
pub mod scoring;

pub use analyzer::{AnalysisOutcome, AnalysisReport, Analyzer};
pub use config::EngineConfig;
pub use errors::EngineError;
pub use models::inputs::AnalysisInputs;
