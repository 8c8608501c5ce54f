//! Rules the block editor applies to a single block while it is being
//! authored, before the draft is written back into the catalog.
//!
//! These are stricter than the catalog validator in places (ids and keys must
//! be slugs, every property needs a label) and looser in others (no SQL or
//! dependency checks); running the validator on the saved catalog is still
//! expected.

use crate::error::DraftIssue;
use crate::schema::{BlockType, OutputMode, PortLimit, PortSpec};
use crate::validator::SLUG;
use ahash::AHashSet;

/// Lowercases `input` and replaces every character outside `[a-z0-9_]`
/// with `_`, the way the editor sanitises ids and keys as they are typed.
pub fn normalize_slug(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' => c,
            _ => '_',
        })
        .collect()
}

/// Checks a draft before saving.
///
/// `existing_ids` are the ids already in the catalog; `original_id` is the id
/// the draft had when editing started (`None` for a new block), so saving a
/// block under its own id is not a collision.
pub fn check_draft<'a>(
    draft: &BlockType,
    existing_ids: impl IntoIterator<Item = &'a str>,
    original_id: Option<&str>,
) -> Vec<DraftIssue> {
    let mut issues = Vec::new();

    if draft.id.is_empty() {
        issues.push(DraftIssue::MissingId);
    }
    if draft.name.is_empty() {
        issues.push(DraftIssue::MissingName);
    }
    if !SLUG.is_match(&draft.id) {
        issues.push(DraftIssue::InvalidId);
    }

    if !draft.inputs.is_ordered() {
        issues.push(DraftIssue::InvertedPortBounds { port: "Inputs" });
    }
    if !draft.outputs.is_ordered() {
        issues.push(DraftIssue::InvertedPortBounds { port: "Outputs" });
    }

    for (index, property) in draft.properties.iter().enumerate() {
        let position = index + 1;
        if property.key.is_empty() {
            issues.push(DraftIssue::MissingPropertyKey { position });
        }
        if property.label.is_empty() {
            issues.push(DraftIssue::MissingPropertyLabel { position });
        }
        if !SLUG.is_match(&property.key) {
            issues.push(DraftIssue::InvalidPropertyKey { position });
        }
    }

    // Collisions only matter once the draft itself is well-formed.
    if issues.is_empty() && original_id != Some(draft.id.as_str()) {
        let existing: AHashSet<&str> = existing_ids.into_iter().collect();
        if existing.contains(draft.id.as_str()) {
            issues.push(DraftIssue::IdCollision(draft.id.clone()));
        }
    }

    issues
}

impl BlockType {
    /// The starting point for a new block in the editor.
    pub fn template(id: &str, name: &str) -> Self {
        let mut outputs = PortSpec::new(1, PortLimit::AtMost(1), &["next"]);
        outputs.mode = Some(OutputMode::Fixed);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: "custom".to_string(),
            icon: "📦".to_string(),
            color: "#6366f1".to_string(),
            inputs: PortSpec::new(1, PortLimit::AtMost(1), &["input"]),
            outputs,
            properties: Vec::new(),
        }
    }

    /// A copy of this block under a derived id and name.
    pub fn duplicate(&self) -> Self {
        Self {
            id: format!("{}_copy", self.id),
            name: format!("{} (Copy)", self.name),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_sanitised() {
        assert_eq!(normalize_slug("Play Audio-2"), "play_audio_2");
        assert_eq!(normalize_slug("already_ok"), "already_ok");
        assert_eq!(normalize_slug("Çava"), "_ava");
    }
}
