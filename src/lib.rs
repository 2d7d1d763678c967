//! Samvaad - Cognitive Twin Service
//!
//! Keeps a per-learner cognitive profile, adapts AI chat prompts to it,
//! analyzes learning sessions in the background, and serves advocacy
//! templates for self-advocacy conversations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
