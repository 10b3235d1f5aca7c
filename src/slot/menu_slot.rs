//! Menu slot value objects
//!
//! A slot is a plain value: mutating one means building a new slot and putting
//! it back into the owning definition. Handlers are shared behind an `Arc`, so
//! cloning a slot is cheap.

use super::{ExtraFields, Metadata, MetadataValue};
use crate::dispatch::ClickContext;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Click handler invoked by the dispatcher
pub type ClickHandler = Arc<dyn Fn(&mut ClickContext<'_>) -> anyhow::Result<()> + Send + Sync>;

/// Wrap a closure as a click handler
pub fn handler<F>(f: F) -> ClickHandler
where
    F: Fn(&mut ClickContext<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Opaque renderable payload the host knows how to draw
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(String);

impl Payload {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier used for handler re-attachment after decoding
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Payload {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Payload {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single addressable cell of a menu grid
#[derive(Clone)]
pub struct Slot {
    index: usize,
    payload: Payload,
    handler: Option<ClickHandler>,
    updatable: bool,
    metadata: Metadata,
    extra: ExtraFields,
}

impl Slot {
    /// Create a slot without a handler. Bounds are checked when the slot is
    /// placed into a definition.
    pub fn new(index: usize, payload: impl Into<Payload>) -> Self {
        Self {
            index,
            payload: payload.into(),
            handler: None,
            updatable: false,
            metadata: Metadata::new(),
            extra: ExtraFields::new(),
        }
    }

    /// Create a slot with a click handler
    pub fn with_handler<F>(index: usize, payload: impl Into<Payload>, f: F) -> Self
    where
        F: Fn(&mut ClickContext<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::new(index, payload).handler(handler(f))
    }

    pub fn handler(mut self, handler: ClickHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn updatable(mut self, updatable: bool) -> Self {
        self.updatable = updatable;
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Unrecognised fields from a stored document
    pub fn extra_fields(mut self, extra: ExtraFields) -> Self {
        self.extra = extra;
        self
    }

    /// Add a single metadata entry
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Same slot with a different payload
    pub fn with_payload(&self, payload: impl Into<Payload>) -> Self {
        Self {
            payload: payload.into(),
            ..self.clone()
        }
    }

    /// Same slot with a different (or no) handler
    pub fn with_handler_replaced(&self, handler: Option<ClickHandler>) -> Self {
        Self {
            handler,
            ..self.clone()
        }
    }

    /// Same slot moved to another index
    pub fn at(&self, index: usize) -> Self {
        Self {
            index,
            ..self.clone()
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn click_handler(&self) -> Option<&ClickHandler> {
        self.handler.as_ref()
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub fn is_updatable(&self) -> bool {
        self.updatable
    }

    pub fn meta_map(&self) -> &Metadata {
        &self.metadata
    }

    pub fn get_meta(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    pub fn extra(&self) -> &ExtraFields {
        &self.extra
    }

    /// Compare everything except the handler
    pub fn same_layout(&self, other: &Slot) -> bool {
        self.index == other.index
            && self.payload == other.payload
            && self.updatable == other.updatable
            && self.metadata == other.metadata
            && self.extra == other.extra
    }
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("index", &self.index)
            .field("payload", &self.payload)
            .field("handler", &self.handler.as_ref().map(|_| "<handler>"))
            .field("updatable", &self.updatable)
            .field("metadata", &self.metadata)
            .field("extra", &self.extra)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_semantics() {
        let slot = Slot::with_handler(4, "stone", |_| Ok(())).meta("amount", 2);
        let renamed = slot.with_payload("dirt");

        assert_eq!(slot.payload().id(), "stone");
        assert_eq!(renamed.payload().id(), "dirt");
        assert!(renamed.has_handler());
        assert_eq!(renamed.get_meta("amount"), Some(&MetadataValue::Int(2)));

        let bare = slot.with_handler_replaced(None);
        assert!(!bare.has_handler());
        assert!(bare.same_layout(&slot));
    }

    #[test]
    fn test_at_moves_index() {
        let slot = Slot::new(0, "pane").updatable(true);
        let moved = slot.at(17);
        assert_eq!(moved.index(), 17);
        assert!(moved.is_updatable());
        assert!(!moved.same_layout(&slot));
    }
}
