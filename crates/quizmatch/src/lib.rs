//! Result matching for multi-step personality assessments.
//!
//! The [`engine`] module holds the pure classification logic. [`catalog`] normalizes authored
//! result definitions, and [`matching`] exposes the engine as a service and HTTP route.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod matching;
pub mod telemetry;
