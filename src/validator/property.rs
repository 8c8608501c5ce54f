use super::json::{
    describe, format_number, number_field, present_but_not_bool, present_but_not_number,
    set_field,
};
use super::sql::SqlGuard;
use super::{Pass, SLUG};
use crate::schema::{MEDIA_TYPES, PROPERTY_TYPES, PropertyType, dependency_token};
use itertools::Itertools;
use serde_json::Value;

impl Pass<'_> {
    /// Checks one property. `position` is its index in `siblings`, the full
    /// property list of the owning block.
    pub(super) fn property(
        &mut self,
        prop: &Value,
        position: usize,
        block_id: &str,
        siblings: &[Value],
    ) {
        let Some(key) = set_field(prop, "key") else {
            self.report.error(
                format!("blocks.{}.properties[{}]", block_id, position),
                "Missing required field 'key'",
            );
            return;
        };
        let key = describe(key);
        let path = format!("blocks.{}.properties.{}", block_id, key);

        let Some(declared) = set_field(prop, "type") else {
            self.report.error(&path, "Missing required field 'type'");
            return;
        };

        if self.validator.slug_checks && !SLUG.is_match(&key) {
            self.report.warning(
                &path,
                format!(
                    "Property key '{}' should start with a lowercase letter and contain only lowercase letters, numbers, and underscores",
                    key
                ),
            );
        }

        let property_type = declared.as_str().and_then(|t| t.parse::<PropertyType>().ok());
        if property_type.is_none() {
            self.report.error(
                &path,
                format!(
                    "Invalid type '{}'. Valid types: {}",
                    describe(declared),
                    PROPERTY_TYPES.iter().join(", ")
                ),
            );
        }

        match property_type {
            Some(PropertyType::Text | PropertyType::Textarea) => {
                if present_but_not_bool(prop, "showPredefinedVariables") {
                    self.report
                        .error(&path, "'showPredefinedVariables' must be a boolean");
                }
            }
            Some(PropertyType::Number) => self.number_property(prop, &path),
            Some(PropertyType::Boolean) => {
                if present_but_not_bool(prop, "default") {
                    self.report.error(&path, "'default' must be a boolean");
                }
            }
            Some(PropertyType::Select) => self.select_property(prop, &path),
            Some(PropertyType::SelectDatabase) => {
                self.database_property(prop, &path, position, siblings)
            }
            None => {}
        }
    }

    fn number_property(&mut self, prop: &Value, path: &str) {
        for field in ["min", "max", "step", "default"] {
            if present_but_not_number(prop, field) {
                self.report
                    .error(path, format!("'{}' must be a number", field));
            }
        }

        if let (Some(min), Some(max)) = (number_field(prop, "min"), number_field(prop, "max")) {
            if min.as_f64() > max.as_f64() {
                self.report.error(
                    path,
                    format!(
                        "'min' ({}) cannot be greater than 'max' ({})",
                        format_number(min),
                        format_number(max)
                    ),
                );
            }
        }
    }

    fn select_property(&mut self, prop: &Value, path: &str) {
        let options = set_field(prop, "options");
        let groups = set_field(prop, "groups");

        match (options, groups) {
            (None, None) => {
                self.report.error(
                    path,
                    "'select' type requires 'options' array or 'groups' array",
                );
            }
            (Some(options), _) if !options.is_array() => {
                self.report.error(path, "'options' must be an array");
            }
            (_, Some(groups)) if !groups.is_array() => {
                self.report.error(path, "'groups' must be an array");
            }
            (Some(Value::Array(options)), None) if options.is_empty() => {
                self.report.warning(path, "'options' array is empty");
            }
            _ => {}
        }

        if let Some(Value::Array(groups)) = groups {
            for (index, group) in groups.iter().enumerate() {
                let group_path = format!("{}.groups[{}]", path, index);
                if set_field(group, "label").is_none() {
                    self.report.error(&group_path, "Missing 'label' field");
                }
                if !group.get("options").is_some_and(Value::is_array) {
                    self.report
                        .error(&group_path, "Missing or invalid 'options' array");
                }
            }
        }

        if present_but_not_bool(prop, "searchable") {
            self.report.error(path, "'searchable' must be a boolean");
        }
    }

    fn database_property(
        &mut self,
        prop: &Value,
        path: &str,
        position: usize,
        siblings: &[Value],
    ) {
        if let Some(Value::Array(groups)) = prop.get("groups") {
            for (index, group) in groups.iter().enumerate() {
                self.query_group(group, &format!("{}.groups[{}]", path, index));
            }
        } else {
            if set_field(prop, "query").is_none() {
                self.report.error(
                    path,
                    "'select_database' type requires 'query' field or 'groups' array",
                );
            }
            if set_field(prop, "valueField").is_none() {
                self.report
                    .error(path, "'select_database' type requires 'valueField' field");
            }
            if set_field(prop, "labelField").is_none() {
                self.report
                    .error(path, "'select_database' type requires 'labelField' field");
            }
        }

        let query = prop.get("query").and_then(Value::as_str).filter(|q| !q.is_empty());
        if let Some(query) = query {
            self.query_text(query, path);
        }

        if let Some(media) = set_field(prop, "propertyType") {
            self.media_type(media, path);
            if set_field(prop, "previewField").is_none() {
                self.report.warning(
                    path,
                    "'propertyType' is set but 'previewField' is missing (preview won't work)",
                );
            }
        }

        if present_but_not_bool(prop, "searchable") {
            self.report.error(path, "'searchable' must be a boolean");
        }

        let depends_on = set_field(prop, "dependsOn");
        if let Some(parent) = depends_on {
            let parent_name = describe(parent);
            match siblings.iter().position(|p| p.get("key") == Some(parent)) {
                None => self.report.error(
                    path,
                    format!(
                        "'dependsOn' references non-existent property '{}'",
                        parent_name
                    ),
                ),
                Some(parent_position) => {
                    if parent_position >= position {
                        self.report.error(
                            path,
                            format!(
                                "'dependsOn' property '{}' must be defined before this property",
                                parent_name
                            ),
                        );
                    }
                    let token = dependency_token(&parent_name);
                    if query.is_some_and(|q| !q.contains(&token)) {
                        self.report.warning(
                            path,
                            format!(
                                "'dependsOn' is set but query doesn't contain placeholder '{}'",
                                token
                            ),
                        );
                    }
                }
            }
        }

        if set_field(prop, "dependencyOptional").is_some() {
            if depends_on.is_none() {
                self.report.warning(
                    path,
                    "'dependencyOptional' is set but 'dependsOn' is not defined",
                );
            }
            let has_fallback = prop
                .get("options")
                .and_then(Value::as_array)
                .is_some_and(|options| !options.is_empty());
            if !has_fallback {
                self.report.warning(
                    path,
                    "'dependencyOptional' is true but no fallback 'options' array provided",
                );
            }
        }

        if set_field(prop, "disabledPlaceholder").is_some() && depends_on.is_none() {
            self.report.warning(
                path,
                "'disabledPlaceholder' is set but 'dependsOn' is not defined (placeholder won't be used)",
            );
        }
    }

    /// One optgroup of a database select; held to the same rules as a
    /// single-query property.
    fn query_group(&mut self, group: &Value, path: &str) {
        for field in ["label", "query", "valueField", "labelField"] {
            if set_field(group, field).is_none() {
                self.report
                    .error(path, format!("Missing '{}' field", field));
            }
        }

        if let Some(query) = group.get("query").and_then(Value::as_str).filter(|q| !q.is_empty()) {
            self.query_text(query, path);
        }

        if let Some(media) = set_field(group, "propertyType") {
            self.media_type(media, path);
            if set_field(group, "previewField").is_none() {
                self.report
                    .warning(path, "'propertyType' is set but 'previewField' is missing");
            }
        }
    }

    fn query_text(&mut self, query: &str, path: &str) {
        if !SqlGuard::is_select(query) {
            self.report.error(path, "Query must be a SELECT statement");
        }
        let forbidden = self.validator.sql.forbidden_in(query);
        if !forbidden.is_empty() {
            self.report.error(
                path,
                format!(
                    "Query contains forbidden SQL commands ({})",
                    forbidden.iter().join(", ")
                ),
            );
        }
    }

    fn media_type(&mut self, media: &Value, path: &str) {
        if !media.as_str().is_some_and(|m| MEDIA_TYPES.contains(&m)) {
            self.report.error(
                path,
                format!(
                    "Invalid 'propertyType' '{}'. Valid types: {}",
                    describe(media),
                    MEDIA_TYPES.iter().join(", ")
                ),
            );
        }
    }
}
