//! Adaptive training load engine.
//!
//! Scores a user's recent training fatigue and turns it into today's workout,
//! either by scaling a template they already use or by synthesizing a preset.

pub mod config;
pub mod models;
pub mod services;
