//! Configuration module for Livraria
//!
//! This module provides configuration management including:
//! - Path resolution under a single base directory
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LivrariaPaths;
pub use settings::{BackupRetention, Settings};
