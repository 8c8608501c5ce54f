//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! kensa crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kensa::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = load_document("path/to/blockDefinitions.json")?;
//! let report = validate(&document);
//!
//! println!("{}", ReportFormatter::verdict(&report));
//! # Ok(())
//! # }
//! ```

// Validation
pub use crate::report::{Diagnostic, ReportFormatter, ValidationReport};
pub use crate::validator::{Validator, ValidatorBuilder, validate};

// Loading
pub use crate::loader::{load_document, parse_document};

// Typed catalog model
pub use crate::schema::{
    BlockType, Catalog, MediaType, OutputMode, PortLimit, PortSpec, Property, PropertyKind,
    PropertyType, SystemVariable,
};

// Editor rules
pub use crate::editor::{check_draft, normalize_slug};

// Error types
pub use crate::error::{CatalogLoadError, DraftIssue, UnknownVariant};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
