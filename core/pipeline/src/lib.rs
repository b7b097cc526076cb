//! The Solace safety and privacy pipeline.
//!
//! Thin composition of the four safety-core components:
//! field encryption ([`solace_crypto`]), response filtering and crisis
//! detection ([`solace_safety`]), and the hazard audit trail
//! ([`solace_audit`]).

pub mod config;
pub mod pipeline;

pub use config::{PipelineConfig, MASTER_KEY_ENV};
pub use pipeline::SafetyPipeline;
