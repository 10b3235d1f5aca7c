//! Instance registry: open menus keyed by view identity

pub mod instance;
#[allow(clippy::module_inception)]
pub mod registry;
pub mod view_id;

pub use instance::MenuInstance;
pub use registry::{MenuRegistry, MenuSource};
pub use view_id::ViewId;
