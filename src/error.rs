use thiserror::Error;

/// Failure modes the engine surfaces across its upstream boundaries and
/// input validation.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Router unreachable or returned non-200. Fatal to the request.
    #[error("upstream router unavailable: {0}")]
    UpstreamRouterError(String),

    /// Overpass timeout, rate-limit, or other non-200. Non-fatal to
    /// `generate` (the engine continues with an empty attractor bag);
    /// fatal only for a pure attractor-fetch call.
    #[error("upstream overpass error: {0}")]
    UpstreamOverpassError(String),

    /// Per-batch DEM failure. Non-fatal: affected samples carry null
    /// elevation.
    #[error("DEM service unavailable: {0}")]
    DemUnavailable(String),

    /// Violated request constraints (latitude, radius, distance bounds).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EngineError::UpstreamRouterError(format!("request timed out: {err}"))
        } else {
            EngineError::UpstreamRouterError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
