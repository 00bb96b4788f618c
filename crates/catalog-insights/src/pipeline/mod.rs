//! Pipeline module.
//!
//! This module provides the end-to-end insights pipeline.

mod builder;

pub use builder::{CatalogInsights, Pipeline, PipelineBuilder};
