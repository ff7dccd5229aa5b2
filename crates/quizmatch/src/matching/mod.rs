//! Match service facade and HTTP routing over the engine.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::match_router;
pub use service::{MatchRequest, MatchResponse, MatchService, MatchServiceError};
