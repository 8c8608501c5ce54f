use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)(?:\.([A-Za-z_][A-Za-z0-9_]*))?\s*\}\}")
        .expect("placeholder pattern is valid")
});

/// A `{{name}}` or `{{name.column}}` token found in a query or text value.
///
/// `name` is either a sibling property key or a system variable; `column`
/// selects a field of the row chosen in a database select.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    pub name: String,
    pub column: Option<String>,
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(column) => write!(f, "{{{{{}.{}}}}}", self.name, column),
            None => write!(f, "{{{{{}}}}}", self.name),
        }
    }
}

/// Lists the placeholders in `text`, in order of appearance.
///
/// Substitution itself belongs to whoever executes the query; this only
/// reports what would be substituted.
pub fn placeholders(text: &str) -> Vec<Placeholder> {
    PLACEHOLDER
        .captures_iter(text)
        .map(|caps| Placeholder {
            name: caps[1].to_string(),
            column: caps.get(2).map(|m| m.as_str().to_string()),
        })
        .collect()
}

/// The exact token a dependent query is expected to contain for `key`.
pub fn dependency_token(key: &str) -> String {
    format!("{{{{{}}}}}", key)
}
