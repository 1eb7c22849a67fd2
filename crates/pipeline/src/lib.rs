//! Recommendation query engine.
//!
//! This crate provides:
//! - Filter trait and implementations (year range, month)
//! - FilterPipeline for composing filters
//! - RecommendationQuery describing what the caller wants
//! - RecommendationEngine answering queries with a bounded random sample
//!
//! ## Architecture
//! A query is processed in stages:
//! 1. The genre's records are fetched from the catalog
//! 2. Filters narrow them down
//! 3. An empty result falls back to the whole genre (`Outcome::Relaxed`)
//! 4. Up to K records are sampled without replacement
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{RecommendationEngine, RecommendationQuery};
//! use data_loader::{Catalog, MediaType};
//! use std::sync::Arc;
//!
//! let engine = RecommendationEngine::new(Arc::new(Catalog::new("data")));
//! let query = RecommendationQuery::new(MediaType::Movie, "Action").years(1990, 2020);
//! let recs = engine.recommend(&query)?;
//! if recs.is_relaxed() {
//!     println!("No exact matches, showing similar picks");
//! }
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod error;
pub mod query;
pub mod sampler;
pub mod engine;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use error::QueryError;
pub use query::{DEFAULT_COUNT, RecommendationQuery};
pub use sampler::sample;
pub use engine::{Outcome, RecommendationEngine, Recommendations};
