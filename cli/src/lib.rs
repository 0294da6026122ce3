//! CLI utilities for samplespeech.
//!
//! This crate provides configuration contexts and output helpers shared by
//! the command line tools.

pub mod config;
pub mod output;

pub use config::{load_config, save_config, Config, Context};
pub use output::{Output, OutputFormat};
