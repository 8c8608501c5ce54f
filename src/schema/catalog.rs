use super::placeholder::{Placeholder, placeholders};
use super::{MediaType, OutputMode, PropertyType};
use crate::error::CatalogLoadError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete, typed block catalog, ready for the canvas and property panel.
///
/// Build one with [`Catalog::from_value`] once a document has passed
/// validation; block types keep the order they have in the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub block_types: IndexMap<String, BlockType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub system_variables: Vec<SystemVariable>,
}

impl Catalog {
    /// Converts a catalog document into the typed model.
    pub fn from_value(document: &Value) -> Result<Self, CatalogLoadError> {
        Self::deserialize(document).map_err(|e| CatalogLoadError::Model(e.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&BlockType> {
        self.block_types.get(id)
    }

    /// Groups block types by category, categories in first-seen order.
    pub fn by_category(&self) -> IndexMap<&str, Vec<&BlockType>> {
        let mut groups: IndexMap<&str, Vec<&BlockType>> = IndexMap::new();
        for block in self.block_types.values() {
            groups.entry(block.category.as_str()).or_default().push(block);
        }
        groups
    }

    /// Case-insensitive palette search over name, id and category.
    pub fn search(&self, term: &str) -> Vec<&BlockType> {
        let term = term.to_lowercase();
        self.block_types
            .values()
            .filter(|block| {
                block.name.to_lowercase().contains(&term)
                    || block.id.to_lowercase().contains(&term)
                    || block.category.to_lowercase().contains(&term)
            })
            .collect()
    }
}

/// One node kind in the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockType {
    pub id: String,
    pub name: String,
    pub category: String,
    pub icon: String,
    pub color: String,
    pub inputs: PortSpec,
    pub outputs: PortSpec,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl BlockType {
    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.key == key)
    }
}

/// Connection bounds for one side of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortSpec {
    pub min: u32,
    pub max: PortLimit,
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<OutputMode>,
}

impl PortSpec {
    pub fn new(min: u32, max: PortLimit, labels: &[&str]) -> Self {
        Self {
            min,
            max,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            mode: None,
        }
    }

    /// The effective output mode; absent means `fixed`.
    pub fn mode(&self) -> OutputMode {
        self.mode.unwrap_or_default()
    }

    /// Whether `count` attached edges respect both bounds.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min as usize && self.max.allows(count)
    }

    /// Whether `min <= max` (always true for an unlimited port).
    pub fn is_ordered(&self) -> bool {
        self.max.allows(self.min as usize)
    }

    /// The label shown for a fixed slot, if one was declared.
    pub fn label(&self, slot: usize) -> Option<&str> {
        self.labels.get(slot).map(String::as_str)
    }
}

/// Upper bound of a port; `-1` on the wire means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PortLimit {
    Unlimited,
    AtMost(u32),
}

impl PortLimit {
    pub fn allows(&self, count: usize) -> bool {
        match self {
            PortLimit::Unlimited => true,
            PortLimit::AtMost(max) => count <= *max as usize,
        }
    }
}

impl TryFrom<i64> for PortLimit {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(PortLimit::Unlimited),
            n => u32::try_from(n)
                .map(PortLimit::AtMost)
                .map_err(|_| format!("port max must be -1 or a non-negative integer, got {}", n)),
        }
    }
}

impl From<PortLimit> for i64 {
    fn from(limit: PortLimit) -> Self {
        match limit {
            PortLimit::Unlimited => -1,
            PortLimit::AtMost(max) => max as i64,
        }
    }
}

/// One configurable field of a block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

impl Property {
    pub fn property_type(&self) -> PropertyType {
        match self.kind {
            PropertyKind::Text(_) => PropertyType::Text,
            PropertyKind::Textarea(_) => PropertyType::Textarea,
            PropertyKind::Number(_) => PropertyType::Number,
            PropertyKind::Boolean(_) => PropertyType::Boolean,
            PropertyKind::Select(_) => PropertyType::Select,
            PropertyKind::SelectDatabase(_) => PropertyType::SelectDatabase,
        }
    }

    /// Whether system variable placeholders may be inserted into this field.
    pub fn offers_system_variables(&self) -> bool {
        match &self.kind {
            PropertyKind::Text(spec) | PropertyKind::Textarea(spec) => {
                spec.show_predefined_variables
            }
            _ => false,
        }
    }

    /// The sibling this property's options depend on, if any.
    pub fn depends_on(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::SelectDatabase(spec) => spec.depends_on.as_deref(),
            _ => None,
        }
    }
}

/// Type-specific payload of a property, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyKind {
    Text(TextSpec),
    Textarea(TextSpec),
    Number(NumberSpec),
    Boolean(BooleanSpec),
    Select(SelectSpec),
    SelectDatabase(DatabaseSelectSpec),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub show_predefined_variables: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
}

impl NumberSpec {
    /// Clamps `value` into the declared bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        let value = self.min.map_or(value, |min| value.max(min));
        self.max.map_or(value, |max| value.min(max))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectSpec {
    #[serde(flatten)]
    pub choices: Choices,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_placeholder: Option<String>,
}

/// Static dropdown entries, either flat or split into optgroups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choices {
    Grouped { groups: Vec<OptionGroup> },
    Flat { options: Vec<SelectOption> },
}

impl Choices {
    /// Every option, group by group.
    pub fn options(&self) -> Vec<&SelectOption> {
        match self {
            Choices::Grouped { groups } => groups.iter().flat_map(|g| g.options.iter()).collect(),
            Choices::Flat { options } => options.iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub label: String,
    pub options: Vec<SelectOption>,
}

/// A dropdown entry: `{value, label}` or a bare string used as both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectOption {
    Labeled { value: Value, label: String },
    Bare(String),
}

impl SelectOption {
    pub fn value(&self) -> String {
        match self {
            SelectOption::Labeled { value, .. } => match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            SelectOption::Bare(s) => s.clone(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SelectOption::Labeled { label, .. } => label,
            SelectOption::Bare(s) => s,
        }
    }
}

/// A dropdown whose entries come from a `SELECT` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSelectSpec {
    #[serde(flatten)]
    pub source: QuerySource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<MediaType>,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    #[serde(default)]
    pub dependency_optional: bool,
    /// Fallback entries shown while an optional dependency is unset.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_placeholder: Option<String>,
}

impl DatabaseSelectSpec {
    pub fn queries(&self) -> Vec<&QuerySpec> {
        match &self.source {
            QuerySource::Grouped { groups } => groups.iter().map(|g| &g.spec).collect(),
            QuerySource::Single(spec) => vec![spec],
        }
    }

    /// Placeholders referenced by any of this dropdown's queries.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        self.queries()
            .into_iter()
            .flat_map(|q| placeholders(&q.query))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuerySource {
    Grouped { groups: Vec<QueryGroup> },
    Single(QuerySpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    pub query: String,
    pub value_field: String,
    pub label_field: String,
}

/// One optgroup of a database select, backed by its own query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryGroup {
    pub label: String,
    #[serde(flatten)]
    pub spec: QuerySpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<MediaType>,
}

/// A global placeholder such as `{{caller_id}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemVariable {
    pub key: String,
    #[serde(default)]
    pub description: String,
}

impl SystemVariable {
    /// The key without its surrounding braces.
    pub fn name(&self) -> &str {
        self.key
            .strip_prefix("{{")
            .and_then(|k| k.strip_suffix("}}"))
            .unwrap_or(&self.key)
    }
}
