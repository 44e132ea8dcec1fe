//! Fitcoach — service core for a fitness-coaching application.
//!
//! Two components carry the design: a pure recommendation engine
//! ([`plan`]) and a conversational onboarding controller ([`onboarding`]).
//! The rest is deliberately thin plumbing: a trait-based store over libSQL
//! ([`store`]), a coach chat proxy with a fallback persona ([`coach`]), and
//! an axum HTTP surface assembled by the binary.

pub mod coach;
pub mod config;
pub mod error;
pub mod onboarding;
pub mod plan;
pub mod profile;
pub mod store;
pub mod tracking;
