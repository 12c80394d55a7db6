//! Medidict - Medicine Dictionary Extraction Engine
//!
//! This crate extracts canonical medicine records from semi-structured
//! encyclopedia detail pages and produces a parsing report alongside the
//! data: which schema fields were found, which are missing, what failed,
//! and a completeness ratio. A validation scorer compares an extracted
//! record field-by-field against a stored reference.
//!
//! Network fetching, persistence, and rendering are host concerns wired in
//! through the traits in [`domain::repositories`].

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod utils;

// Re-export the public surface for easier access
pub use application::extraction_service::ExtractionService;
pub use application::validation_service;
pub use domain::medicine::{
    FieldValue, MedicineDocument, MedicineRecord, ParsingReport, StoredMedicine, ValidationMap,
    ValidationResult,
};
pub use domain::repositories::{HtmlFetcher, MedicineRepository};
pub use domain::schema::{FieldGroup, MedicineField, UnknownFieldError};
pub use infrastructure::parsing::{
    ContextualParser, DetailParseContext, MedicineDetailParser, MedicineDetailSelectors,
    ParsingConfig, ParsingError, ParsingResult,
};
