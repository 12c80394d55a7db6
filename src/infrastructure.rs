//! Infrastructure module - parsing engine and logging setup
//!
//! Everything that touches concrete technology lives here; the domain layer
//! stays free of selector strings and subscriber wiring.

pub mod logging;
pub mod parsing;
