//! Interview coaching core.
//!
//! Mock-interview simulation and ATS resume scans backed by a hosted
//! generative model, with tier-gated reports. The embedding front end builds
//! a [`Coach`], asks it for flow controllers and renders their views.

pub mod config;
pub mod errors;
pub mod gateway;
pub mod llm_client;
pub mod models;
pub mod resume;
pub mod simulation;
pub mod state;
pub mod telemetry;
pub mod tier;

pub use config::Config;
pub use errors::CoachError;
pub use state::Coach;
