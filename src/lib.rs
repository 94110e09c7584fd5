//! sondage - a sampling engine for tabular survey data
//!
//! Given a population dataset loaded from a CSV or Excel source, the
//! engine draws samples under two designs - simple random sampling
//! without replacement (SRS) and proportional stratified sampling - and
//! computes the allocation and comparison tables needed to validate
//! them. Every produced table exports as portable CSV bytes.

// Core dataset model and typed columns
pub mod dataset;

// Error type and Result alias
pub mod error;

// Result exporter (CSV serialization, artifact names)
pub mod export;

// Tabular sources: CSV, Excel, memoized load cache
pub mod io;

// Sampling, allocation and descriptive statistics
pub mod stats;

// Portable row/column tables
pub mod table;

// Re-export core types
pub use dataset::{Column, ColumnType, Dataset, Frequency};
pub use error::{Error, Result};
pub use export::Artifact;
pub use io::SourceCache;
pub use stats::{Allocation, DescriptiveStats, ProportionComparison, StratumAllocation};
pub use table::Table;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
