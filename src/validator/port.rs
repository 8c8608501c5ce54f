use super::Pass;
use super::json::{describe, format_number, number_field, set_field};
use crate::schema::{OUTPUT_MODES, REQUIRED_PORT_FIELDS};
use itertools::Itertools;
use serde_json::Value;

/// Which side of a block a port spec describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PortSide {
    Inputs,
    Outputs,
}

impl PortSide {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            PortSide::Inputs => "inputs",
            PortSide::Outputs => "outputs",
        }
    }
}

impl Pass<'_> {
    pub(super) fn port(&mut self, port: &Value, block_id: &str, side: PortSide) {
        let path = format!("blocks.{}.{}", block_id, side.as_str());

        for field in REQUIRED_PORT_FIELDS {
            if port.get(field).is_none() {
                self.report
                    .error(&path, format!("Missing required field '{}'", field));
            }
        }

        let min = number_field(port, "min");
        let max = number_field(port, "max");
        if min.is_none() {
            self.report.error(&path, "'min' must be a number");
        }
        if max.is_none() {
            self.report.error(&path, "'max' must be a number");
        }

        if let (Some(min), Some(max)) = (min, max) {
            let (low, high) = (
                min.as_f64().unwrap_or_default(),
                max.as_f64().unwrap_or_default(),
            );
            if low < 0.0 {
                self.report.error(&path, "'min' cannot be negative");
            }
            if high != -1.0 && high < low {
                self.report.error(
                    &path,
                    format!(
                        "'max' ({}) cannot be less than 'min' ({})",
                        format_number(max),
                        format_number(min)
                    ),
                );
            }
        }

        if !port.get("labels").is_some_and(Value::is_array) {
            self.report.error(&path, "'labels' must be an array");
        }

        if side == PortSide::Outputs {
            if let Some(mode) = set_field(port, "mode") {
                if !mode.as_str().is_some_and(|m| OUTPUT_MODES.contains(&m)) {
                    self.report.error(
                        &path,
                        format!(
                            "Invalid 'mode' '{}'. Valid modes: {}",
                            describe(mode),
                            OUTPUT_MODES.iter().join(", ")
                        ),
                    );
                }
            }
        }
    }
}
