//! Menu definitions and the helpers that build them

pub mod animation;
pub mod definition;
pub mod filler;
pub mod layout;
pub mod modifiers;

pub use animation::{Animation, AnimationKind, Frame};
pub use definition::{
    CellUpdate, CloseHandler, Generation, MenuDefinition, RenderRequest, UpdateMode, DEFAULT_WIDTH,
    MAX_HEIGHT, MAX_WIDTH,
};
pub use filler::Side;
pub use layout::MenuLayout;
pub use modifiers::Modifiers;
