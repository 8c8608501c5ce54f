//! The catalog validation engine.
//!
//! A [`Validator`] walks a catalog document and collects every problem it
//! finds into a [`ValidationReport`]. Nothing in the document can make the
//! walk stop early: a malformed node is reported and traversal moves on, so a
//! single run surfaces the complete list of defects.
//!
//! Traversal order is fixed: the `blockTypes` map in document order, each
//! block's ports and then its properties in array order, and finally
//! `systemVariables`.

mod json;
mod port;
mod property;
mod sql;

use crate::report::ValidationReport;
use crate::schema::REQUIRED_BLOCK_FIELDS;
use itertools::Itertools;
use json::{describe, set_field};
use port::PortSide;
use regex::Regex;
use serde_json::Value;
use sql::SqlGuard;
use std::mem;
use std::sync::LazyLock;
use tracing::{debug, trace};

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("color pattern is valid"));

pub(crate) static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("slug pattern is valid"));

/// Validates a catalog document with the default configuration.
pub fn validate(document: &Value) -> ValidationReport {
    Validator::default().validate(document)
}

/// A configured validation pass. Cheap to share; holds no per-run state.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    sql: SqlGuard,
    slug_checks: bool,
}

/// Builder for a [`Validator`] with a custom configuration.
#[derive(Debug, Clone)]
pub struct ValidatorBuilder {
    extra_keywords: Vec<String>,
    slug_checks: bool,
}

impl ValidatorBuilder {
    /// A builder with the default configuration.
    pub fn new() -> Self {
        Self {
            extra_keywords: Vec::new(),
            slug_checks: false,
        }
    }

    /// Adds a keyword to the forbidden SQL list. The built-in keywords are
    /// always kept.
    pub fn with_forbidden_keyword(mut self, keyword: &str) -> Self {
        self.extra_keywords.push(keyword.to_string());
        self
    }

    /// Warns about block and property keys that are not lowercase slugs.
    pub fn with_slug_checks(mut self, enabled: bool) -> Self {
        self.slug_checks = enabled;
        self
    }

    /// Consumes the builder and creates the validator.
    pub fn build(self) -> Validator {
        Validator {
            sql: SqlGuard::new(&self.extra_keywords),
            slug_checks: self.slug_checks,
        }
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// The forbidden SQL keywords this validator scans for.
    pub fn forbidden_keywords(&self) -> &[String] {
        self.sql.keywords()
    }

    /// Runs every check against `document` and returns the findings.
    ///
    /// The document is never modified and no I/O happens here; loading and
    /// parsing are the caller's job.
    pub fn validate(&self, document: &Value) -> ValidationReport {
        let mut pass = Pass {
            validator: self,
            report: ValidationReport::new(),
        };
        pass.root(document);
        debug!(
            errors = pass.report.errors.len(),
            warnings = pass.report.warnings.len(),
            "catalog validated"
        );
        pass.report
    }
}

/// State of a single run: the configuration plus the growing report.
struct Pass<'a> {
    validator: &'a Validator,
    report: ValidationReport,
}

impl Pass<'_> {
    fn root(&mut self, document: &Value) {
        match set_field(document, "blockTypes") {
            None => {
                self.report
                    .error("Root", "Missing required field \"blockTypes\"");
            }
            Some(Value::Object(blocks)) => {
                debug!(count = blocks.len(), "found block types");
                for (block_id, block) in blocks {
                    self.block(block_id, block);
                }
            }
            Some(_) => {
                self.report.error("Root", "\"blockTypes\" must be an object");
            }
        }

        if let Some(variables) = set_field(document, "systemVariables") {
            self.system_variables(variables);
        }
    }

    fn block(&mut self, block_id: &str, block: &Value) {
        let path = format!("blocks.{}", block_id);
        debug!(block = block_id, "validating block");

        for field in REQUIRED_BLOCK_FIELDS {
            if block.get(field).is_none() {
                self.report
                    .error(&path, format!("Missing required field '{}'", field));
            }
        }

        if self.validator.slug_checks && !SLUG.is_match(block_id) {
            self.report.warning(
                &path,
                format!(
                    "Block key '{}' should start with a lowercase letter and contain only lowercase letters, numbers, and underscores",
                    block_id
                ),
            );
        }

        if let Some(id) = set_field(block, "id") {
            if id.as_str() != Some(block_id) {
                self.report.warning(
                    &path,
                    format!(
                        "Block 'id' ({}) doesn't match key '{}'",
                        describe(id),
                        block_id
                    ),
                );
            }
        }

        if let Some(color) = set_field(block, "color") {
            if !color.as_str().is_some_and(|c| HEX_COLOR.is_match(c)) {
                self.report.warning(
                    &path,
                    "'color' should be a 6-digit hex color (e.g., #FF5722)",
                );
            }
        }

        if let Some(inputs) = set_field(block, "inputs") {
            self.port(inputs, block_id, PortSide::Inputs);
        }
        if let Some(outputs) = set_field(block, "outputs") {
            self.port(outputs, block_id, PortSide::Outputs);
        }

        let Some(properties) = set_field(block, "properties") else {
            return;
        };
        let Some(properties) = properties.as_array() else {
            self.report.error(&path, "'properties' must be an array");
            return;
        };

        // Keys of different JSON types never collide.
        let duplicates = properties
            .iter()
            .filter_map(|p| set_field(p, "key"))
            .duplicates_by(|key| (mem::discriminant(*key), describe(key)))
            .map(describe)
            .join(", ");
        if !duplicates.is_empty() {
            self.report.error(
                &path,
                format!("Duplicate property keys found: {}", duplicates),
            );
        }

        for (position, property) in properties.iter().enumerate() {
            trace!(block = block_id, position, "validating property");
            self.property(property, position, block_id, properties);
        }
    }

    fn system_variables(&mut self, variables: &Value) {
        let Some(variables) = variables.as_array() else {
            self.report.error("systemVariables", "Must be an array");
            return;
        };

        for (index, variable) in variables.iter().enumerate() {
            let path = format!("systemVariables[{}]", index);
            let key = set_field(variable, "key");
            if key.is_none() {
                self.report.error(&path, "Missing required field 'key'");
            }
            if set_field(variable, "description").is_none() {
                self.report.warning(&path, "Missing 'description' field");
            }
            if let Some(key) = key {
                let wrapped = key
                    .as_str()
                    .is_some_and(|k| k.starts_with("{{") && k.ends_with("}}"));
                if !wrapped {
                    self.report.warning(
                        &path,
                        format!(
                            "Variable '{}' should use {{{{variable}}}} format",
                            describe(key)
                        ),
                    );
                }
            }
        }
    }
}
