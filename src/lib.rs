//! # Kensa - Block Catalog Validation Engine
//!
//! **Kensa** checks the block-type catalogs that drive node-based flow builders.
//! A catalog describes every block a user can drop on the canvas: its ports,
//! its configurable properties and the dropdowns those properties fill from
//! database queries. Kensa decides whether such a catalog is well-formed,
//! including the cross-references between properties (dependent dropdowns,
//! optgroups, duplicate keys) that a plain JSON Schema cannot express.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Read the catalog into a `serde_json::Value` with
//!     [`loader::load_document`], or take it from wherever your editor keeps it.
//! 2.  **Validate**: Run [`validate`] (or a configured [`Validator`]). The result
//!     is a [`ValidationReport`] listing errors and warnings, each located by a
//!     dotted path.
//! 3.  **Gate**: Accept the catalog only if [`ValidationReport::is_acceptable`].
//!     Warnings never block acceptance.
//! 4.  **Use**: Convert the accepted document into the typed [`schema::Catalog`]
//!     for the canvas and property panel.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kensa::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let document = load_document("src/blockDefinitions.json")?;
//!
//!     let validator = Validator::builder()
//!         .with_forbidden_keyword("TRUNCATE")
//!         .build();
//!     let report = validator.validate(&document);
//!
//!     print!("{}", ReportFormatter::format_text(&report));
//!     if !report.is_acceptable() {
//!         std::process::exit(1);
//!     }
//!
//!     let catalog = Catalog::from_value(&document)?;
//!     for (category, blocks) in catalog.by_category() {
//!         println!("{}: {} block(s)", category, blocks.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod editor;
pub mod error;
pub mod loader;
pub mod prelude;
pub mod report;
pub mod schema;
pub mod validator;

pub use report::{Diagnostic, ValidationReport};
pub use validator::{Validator, ValidatorBuilder, validate};
