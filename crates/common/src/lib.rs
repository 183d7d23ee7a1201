//! Common utilities shared by the CodeArena crates.
//!
//! This crate provides:
//! - Configuration management
//! - Telemetry (tracing subscriber setup)
//! - Date windows for "recent" filters
//! - Sort direction and pagination helpers
//! - Text matching and number formatting

pub mod config;
pub mod datetime;
pub mod pagination;
pub mod telemetry;
pub mod text;

// Re-export commonly used types
pub use config::{AppConfig, EditorConfig, ListingConfig, TelemetryConfig, VisualizerConfig};
pub use datetime::{format_datetime, now_utc, parse_datetime, DateWindow};
pub use pagination::{PaginatedResult, PaginationParams, SortDirection};
pub use telemetry::init_tracing;
pub use text::{contains_ignore_case, format_thousands, QueryText};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
