//! Core module - loading, configuration, errors and numeric primitives

pub mod config;
pub mod error;
pub mod loader;
pub mod session;
pub mod stats;

pub use config::{AnalysisConfig, Config, TableConfig};
pub use error::AnalyzerError;
pub use loader::{coerce_bytes, coerce_cell, load_path, load_reader, Cell};
pub use session::Session;
