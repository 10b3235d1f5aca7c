//! Inbound click events
//!
//! The host translates its own click callback into a `ClickEvent`. Only the
//! view, the cell index and the interaction kind matter to the engine; anything
//! else the host wants handlers to see goes into `extra`.

use crate::registry::ViewId;
use crate::slot::{Metadata, MetadataValue};

/// Mouse or key gesture the viewer used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClickKind {
    #[default]
    Left,
    Right,
    ShiftLeft,
    ShiftRight,
    Middle,
    Double,
    /// Hotbar swap; the button is in `Interaction::hotbar_button`
    NumberKey,
    Drop,
    ControlDrop,
    Unknown,
}

impl ClickKind {
    pub fn is_shift(self) -> bool {
        matches!(self, ClickKind::ShiftLeft | ClickKind::ShiftRight)
    }

    pub fn is_left(self) -> bool {
        matches!(self, ClickKind::Left | ClickKind::ShiftLeft | ClickKind::Double)
    }

    pub fn is_right(self) -> bool {
        matches!(self, ClickKind::Right | ClickKind::ShiftRight)
    }
}

/// Built-in effect the host would apply if the click is not cancelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HostAction {
    Nothing,
    #[default]
    Pickup,
    Place,
    Swap,
    Drop,
    Clone,
    Other,
}

/// Raw interaction details passed through to handlers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    pub kind: ClickKind,
    pub action: HostAction,
    pub hotbar_button: Option<u8>,
    pub extra: Metadata,
}

/// One click on one cell of one open view
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub view: ViewId,
    pub index: usize,
    pub interaction: Interaction,
}

impl ClickEvent {
    /// Plain left click picking up the cell's item
    pub fn new(view: ViewId, index: usize) -> Self {
        Self {
            view,
            index,
            interaction: Interaction::default(),
        }
    }

    pub fn kind(mut self, kind: ClickKind) -> Self {
        self.interaction.kind = kind;
        self
    }

    pub fn action(mut self, action: HostAction) -> Self {
        self.interaction.action = action;
        self
    }

    pub fn hotbar(mut self, button: u8) -> Self {
        self.interaction.kind = ClickKind::NumberKey;
        self.interaction.hotbar_button = Some(button);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.interaction.extra.insert(key.into(), value.into());
        self
    }
}
