//! # IA CGDF
//!
//! Detects personal data in Participa DF requests with a pretrained BERT sequence classifier.
#![forbid(unsafe_code)]

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Tabular datasets
pub mod datasets;

/// Utilities
pub mod utils;

/// Run settings
pub mod config;

/// Error macros
#[macro_use]
extern crate anyhow;
