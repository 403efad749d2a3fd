//! Insurance onboarding engine: question flow, risk scoring, and plan recommendations.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
