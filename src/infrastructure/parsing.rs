//! HTML parsing infrastructure
//!
//! Trait-based parsing architecture with per-field selector fallback chains
//! and a report that accounts for every schema field on every run.

pub mod config;
pub mod context;
pub mod error;
pub mod medicine_detail_parser;

// Re-export public types
pub use config::{MedicineDetailSelectors, ParsingConfig};
pub use context::DetailParseContext;
pub use error::{ParsingError, ParsingResult};
pub use medicine_detail_parser::MedicineDetailParser;

/// Parser trait with context support
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse raw HTML with contextual information
    fn parse_with_context(&self, html: &str, context: &Self::Context)
        -> ParsingResult<Self::Output>;
}
