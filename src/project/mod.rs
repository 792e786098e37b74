//! Project settings: import roots and include paths.

mod config;

pub use config::AnalysisConfig;
