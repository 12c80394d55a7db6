//! Domain module - Core business logic and entities
//!
//! This module contains the medicine record entities, the field schema
//! registry, and the repository traits the out-of-scope collaborators
//! implement.

pub mod medicine;
pub mod repositories;
pub mod schema;

// Re-export commonly used items
pub use medicine::{
    FieldValue, MedicineDocument, MedicineRecord, ParsingReport, StoredMedicine, ValidationMap,
    ValidationResult,
};
pub use schema::{FieldGroup, MedicineField, UnknownFieldError};
