//! Menu engine error handling
//!
//! Structural errors (bounds, paging, codec versions) are returned to whoever
//! triggered them. Handler failures are wrapped in `HandlerInvocation` and only
//! ever reach the dispatcher's error reporter.

use crate::registry::ViewId;

/// Result type for menu operations
pub type MenuResult<T> = Result<T, MenuError>;

/// Errors raised by the menu engine
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("slot index {index} is outside the {width}x{height} grid")]
    OutOfBounds {
        index: usize,
        width: usize,
        height: usize,
    },

    #[error("page {page} is out of range (menu has {page_count} pages)")]
    PageOutOfRange { page: i64, page_count: usize },

    #[error("document version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("click handler for view {view} failed at slot {index}: {source}")]
    HandlerInvocation {
        view: ViewId,
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("no open menu for view {0}")]
    UnknownInstance(ViewId),

    #[error("invalid menu dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl MenuError {
    /// Whether the dispatcher treats this error as a soft no-op signal
    pub fn is_soft(&self) -> bool {
        matches!(self, MenuError::UnknownInstance(_))
    }
}

/// Create an out of bounds error for a grid
pub fn out_of_bounds(index: usize, width: usize, height: usize) -> MenuError {
    MenuError::OutOfBounds {
        index,
        width,
        height,
    }
}

/// Create a page out of range error
pub fn page_out_of_range(page: i64, page_count: usize) -> MenuError {
    MenuError::PageOutOfRange { page, page_count }
}

/// Create a migration error
pub fn migration_error(reason: impl std::fmt::Display) -> MenuError {
    MenuError::Migration(reason.to_string())
}

/// Turn a caught panic payload into a handler error
pub fn panic_to_error(payload: Box<dyn std::any::Any + Send>) -> anyhow::Error {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic message".to_string()
    };
    anyhow::anyhow!("handler panicked: {}", message)
}
