//! Configuration module for Image-Survey
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file the built-in defaults apply.
//!
//! # Example
//!
//! ```no_run
//! use image_survey::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("survey.toml")).unwrap();
//! println!("Minimum image size: {} bytes", config.report.min_image_bytes);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, ReportConfig, DEFAULT_MIN_IMAGE_BYTES, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
