use super::ValidationReport;
use std::fmt::Write;

/// Renders validation reports for people and for tools.
pub struct ReportFormatter;

impl ReportFormatter {
    /// A sectioned, human-readable rendering: errors, then warnings, then a
    /// summary with the verdict.
    pub fn format_text(report: &ValidationReport) -> String {
        let mut out = String::new();
        Self::section(&mut out, "Validation Results");

        if report.is_clean() {
            out.push_str("✓ All validations passed!\n");
            return out;
        }

        if !report.errors.is_empty() {
            let _ = writeln!(out, "\nErrors ({}):", report.errors.len());
            for diagnostic in &report.errors {
                let _ = writeln!(out, "✗ ERROR: {}", diagnostic);
            }
        }

        if !report.warnings.is_empty() {
            let _ = writeln!(out, "\nWarnings ({}):", report.warnings.len());
            for diagnostic in &report.warnings {
                let _ = writeln!(out, "⚠ WARNING: {}", diagnostic);
            }
        }

        Self::section(&mut out, "Summary");
        let _ = writeln!(out, "  Errors:   {}", report.errors.len());
        let _ = writeln!(out, "  Warnings: {}", report.warnings.len());
        out.push_str(Self::verdict(report));
        out.push('\n');
        out
    }

    /// One-line verdict.
    pub fn verdict(report: &ValidationReport) -> &'static str {
        if !report.is_acceptable() {
            "✗ Validation failed!"
        } else if report.is_clean() {
            "✓ All validations passed!"
        } else {
            "✓ Validation passed with warnings"
        }
    }

    /// Pretty-printed JSON with `errors`, `warnings` and `valid`.
    pub fn format_json(report: &ValidationReport) -> Result<String, serde_json::Error> {
        let value = serde_json::json!({
            "valid": report.is_acceptable(),
            "errors": report.errors,
            "warnings": report.warnings,
        });
        serde_json::to_string_pretty(&value)
    }

    fn section(out: &mut String, title: &str) {
        let _ = writeln!(out, "\n━━━ {} ━━━", title);
    }
}
