//! The block definition contract: canonical enumerations, required-field
//! lists and the typed catalog model built on top of them.

pub mod catalog;
pub mod placeholder;

pub use catalog::*;
pub use placeholder::*;

use crate::error::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Property types understood by the property panel, in canonical order.
pub const PROPERTY_TYPES: [&str; 6] = [
    "text",
    "textarea",
    "number",
    "boolean",
    "select",
    "select_database",
];

/// Media preview types a database select may render.
pub const MEDIA_TYPES: [&str; 3] = ["media_audio", "media_image", "media_video"];

/// Output port modes.
pub const OUTPUT_MODES: [&str; 2] = ["fixed", "dynamic"];

/// Fields every block type must declare.
pub const REQUIRED_BLOCK_FIELDS: [&str; 8] = [
    "id",
    "name",
    "category",
    "icon",
    "color",
    "inputs",
    "outputs",
    "properties",
];

/// Fields every port spec must declare.
pub const REQUIRED_PORT_FIELDS: [&str; 3] = ["min", "max", "labels"];

/// SQL commands a dropdown query must never contain.
pub const FORBIDDEN_SQL_KEYWORDS: [&str; 4] = ["INSERT", "UPDATE", "DELETE", "DROP"];

/// Declares a string-backed enumeration whose wire names are fixed.
macro_rules! canonical_enum {
    ($(#[$meta:meta])* $name:ident { $( $variant:ident => $wire:literal ),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $wire)] $variant, )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),* ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )*
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )*
                    other => Err(UnknownVariant(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

canonical_enum! {
    /// The `type` discriminator of a property.
    PropertyType {
        Text => "text",
        Textarea => "textarea",
        Number => "number",
        Boolean => "boolean",
        Select => "select",
        SelectDatabase => "select_database",
    }
}

canonical_enum! {
    /// How a database select previews the selected row.
    MediaType {
        Audio => "media_audio",
        Image => "media_image",
        Video => "media_video",
    }
}

canonical_enum! {
    /// Whether a block's output labels are fixed by the definition or
    /// editable per node on the canvas.
    OutputMode {
        Fixed => "fixed",
        Dynamic => "dynamic",
    }
}

impl Default for OutputMode {
    fn default() -> Self {
        OutputMode::Fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerations_match_wire_names() {
        let names: Vec<_> = PropertyType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, PROPERTY_TYPES);
        let names: Vec<_> = MediaType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, MEDIA_TYPES);
        let names: Vec<_> = OutputMode::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, OUTPUT_MODES);
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!(
            "select_database".parse::<PropertyType>(),
            Ok(PropertyType::SelectDatabase)
        );
        assert!("Select".parse::<PropertyType>().is_err());
        assert!("DYNAMIC".parse::<OutputMode>().is_err());
    }

    #[test]
    fn unknown_variant_names_the_input() {
        let err = "media_gif".parse::<MediaType>().unwrap_err();
        assert_eq!(err, UnknownVariant("media_gif".to_string()));
        assert_eq!(err.to_string(), "unknown variant 'media_gif'");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }
}
