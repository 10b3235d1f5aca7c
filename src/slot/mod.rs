//! Slot model: the leaf value type of every menu grid

pub mod menu_slot;
pub mod metadata;

pub use menu_slot::{handler, ClickHandler, Payload, Slot};
pub use metadata::{ExtraFields, Metadata, MetadataValue};
