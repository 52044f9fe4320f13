//! Configuration module for FinanzCLI
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Backend and AI endpoint preferences

pub mod paths;
pub mod settings;

pub use paths::FinanzPaths;
pub use settings::{AiSettings, FallbackMode, Settings};
