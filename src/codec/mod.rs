//! Serialization codec
//!
//! Converts menu definitions and pagination templates to and from versioned,
//! handler-free documents.
//! Storage is up to the caller; documents come out as values or JSON text.

pub mod convert;
pub mod document;
pub mod migration;

pub use convert::{decode, decode_paginated, decode_without_handlers, encode, encode_paginated};
pub use document::{
    check_version, document_version, AnimationDocument, MenuDocument, NavDocument, PaginatedDocument, SlotDocument,
    CURRENT_VERSION,
};
pub use migration::{DocumentMigration, MigrationManager};
