//! View identity
//!
//! Opaque key the host hands out for one open menu of one viewer, for example
//! a player id joined with a session counter. Cheap to clone and hash.

use std::fmt;
use std::sync::Arc;

/// Identity of one open view
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(Arc<str>);

impl ViewId {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// Build an identity from a viewer key and a session number
    pub fn for_session(viewer: impl fmt::Display, session: u64) -> Self {
        Self::new(format!("{}#{}", viewer, session))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}
