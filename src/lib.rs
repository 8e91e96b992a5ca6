//! Iterative geometric-search route generation engine for hiking and
//! running loops. See `RouteGenerationEngine::generate` for the entry
//! point.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod geo;
pub mod models;
pub mod services;

pub use config::EngineConfig;
pub use engine::RouteGenerationEngine;
pub use error::{EngineError, Result};
pub use models::{GenerationRequest, GeneratedRoute, RouteFeature, RouteShape};
