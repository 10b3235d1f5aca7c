//! Serialized menu documents
//!
//! Handler-free, versioned representation of a menu layout. Field order in
//! the JSON output follows struct order, and slots are always written in
//! ascending index order, so encoding the same definition twice yields the
//! same text.

use super::migration::MigrationManager;
use crate::error::{MenuError, MenuResult};
use crate::menu::{AnimationKind, UpdateMode};
use crate::pagination::{NavBoundary, OverflowStrategy};
use crate::slot::{ExtraFields, Metadata};
use crate::text::StyledText;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version written by this codec
pub const CURRENT_VERSION: u32 = 2;

/// One stored cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDocument {
    pub index: usize,
    pub payload: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
    /// Per-slot fields this codec does not know, kept as-is
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// One stored animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDocument {
    #[serde(default)]
    pub kind: AnimationKind,
    #[serde(default)]
    pub start_delay: u32,
    pub interval: u32,
    pub frames: Vec<Vec<SlotDocument>>,
}

/// Stored menu layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDocument {
    pub version: u32,
    pub width: usize,
    pub height: usize,
    pub title: StyledText,
    #[serde(default)]
    pub update_mode: UpdateMode,
    /// Modifier flag names; absent means fully locked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<String>>,
    #[serde(default)]
    pub slots: Vec<SlotDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<AnimationDocument>,
    /// Top-level fields this codec does not know, kept as-is
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl MenuDocument {
    /// Pretty-printed JSON text
    pub fn to_json(&self) -> MenuResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse JSON text, upgrading older versions through the migration chain
    pub fn from_json(raw: &str) -> MenuResult<Self> {
        Self::from_json_with(raw, &MigrationManager::new())
    }

    /// Parse JSON text using a caller-supplied migration chain
    pub fn from_json_with(raw: &str, migrations: &MigrationManager) -> MenuResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value_with(value, migrations)
    }

    /// Build a document from an already parsed JSON value
    pub fn from_value_with(mut value: serde_json::Value, migrations: &MigrationManager) -> MenuResult<Self> {
        let found = check_version(document_version(&value)?)?;
        if found < CURRENT_VERSION {
            migrations.migrate(&mut value, found, CURRENT_VERSION)?;
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Read the `version` field; documents without one are treated as version 1
pub fn document_version(value: &serde_json::Value) -> MenuResult<u32> {
    match value.get("version") {
        None => Ok(1),
        Some(version) => version
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| MenuError::Migration(format!("invalid document version {}", version))),
    }
}

/// Navigation button of a stored paginated menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavDocument {
    pub index: usize,
    pub slot: SlotDocument,
}

/// Stored pagination template: base layout, static cells, buttons and items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedDocument {
    pub version: u32,
    pub base: MenuDocument,
    #[serde(default)]
    pub static_cells: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NavDocument>,
    #[serde(default)]
    pub overflow: OverflowStrategy,
    #[serde(default)]
    pub boundary: NavBoundary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_pages: Option<usize>,
    #[serde(default)]
    pub items: Vec<SlotDocument>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl PaginatedDocument {
    pub fn to_json(&self) -> MenuResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> MenuResult<Self> {
        Self::from_json_with(raw, &MigrationManager::new())
    }

    pub fn from_json_with(raw: &str, migrations: &MigrationManager) -> MenuResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value_with(value, migrations)
    }

    /// The embedded base layout goes through the same migration chain. A base
    /// without its own `version` is taken to be as old as the outer document.
    pub fn from_value_with(mut value: serde_json::Value, migrations: &MigrationManager) -> MenuResult<Self> {
        let found = check_version(document_version(&value)?)?;
        let object = value
            .as_object_mut()
            .ok_or_else(|| MenuError::Migration("paginated document is not a JSON object".to_string()))?;

        if let Some(mut base) = object.remove("base") {
            if let Some(fields) = base.as_object_mut() {
                fields
                    .entry("version")
                    .or_insert_with(|| serde_json::Value::from(found));
            }
            let base = MenuDocument::from_value_with(base, migrations)?;
            object.insert("base".to_string(), serde_json::to_value(base)?);
        }
        object.insert("version".to_string(), serde_json::Value::from(CURRENT_VERSION));

        Ok(serde_json::from_value(value)?)
    }
}

/// Fail when `version` is newer than this codec understands
pub fn check_version(version: u32) -> MenuResult<u32> {
    if version > CURRENT_VERSION {
        return Err(MenuError::UnsupportedVersion {
            found: version,
            supported: CURRENT_VERSION,
        });
    }
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_newer_version_rejected() {
        let raw = json!({"version": 3, "width": 9, "height": 1, "title": "x"}).to_string();
        let err = MenuDocument::from_json(&raw).unwrap_err();
        assert!(matches!(err, MenuError::UnsupportedVersion { found: 3, supported: 2 }));
    }

    #[test]
    fn test_unknown_fields_survive() {
        let raw = json!({
            "version": 2,
            "width": 9,
            "height": 1,
            "title": "Shop",
            "slots": [{"index": 4, "payload": "emerald"}],
            "theme": {"accent": "gold"}
        })
        .to_string();

        let doc = MenuDocument::from_json(&raw).unwrap();
        assert_eq!(doc.extra.get("theme"), Some(&json!({"accent": "gold"})));

        let again = MenuDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_unknown_slot_fields_survive_parsing() {
        let raw = json!({
            "version": 2,
            "width": 9,
            "height": 1,
            "title": "Shop",
            "slots": [{"index": 4, "payload": "emerald", "amount": 3, "note": null}]
        })
        .to_string();

        let doc = MenuDocument::from_json(&raw).unwrap();
        assert_eq!(doc.slots[0].extra.get("amount"), Some(&json!(3)));
        assert_eq!(doc.slots[0].extra.get("note"), Some(&json!(null)));
        assert!(doc.to_json().unwrap().contains("\"amount\": 3"));
    }

    #[test]
    fn test_paginated_base_inherits_old_version() {
        let raw = json!({
            "version": 1,
            "base": {"title": "Old", "rows": 2},
            "static_cells": [9, 17]
        })
        .to_string();

        let doc = PaginatedDocument::from_json(&raw).unwrap();
        assert_eq!(doc.version, CURRENT_VERSION);
        assert_eq!(doc.base.version, CURRENT_VERSION);
        assert_eq!((doc.base.width, doc.base.height), (9, 2));
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_paginated_newer_version_rejected() {
        let raw = json!({"version": 5, "base": {"version": 2, "width": 9, "height": 1, "title": "x"}}).to_string();
        assert!(matches!(
            PaginatedDocument::from_json(&raw),
            Err(MenuError::UnsupportedVersion { found: 5, .. })
        ));
    }

    #[test]
    fn test_bad_version_field() {
        let raw = json!({"version": "two"}).to_string();
        assert!(matches!(MenuDocument::from_json(&raw), Err(MenuError::Migration(_))));
    }
}
