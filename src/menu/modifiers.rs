//! Menu modifiers
//!
//! Decide which built-in host actions stay blocked when a viewer clicks a cell
//! that has no handler. Clicks on handled cells are always cancelled.

use crate::dispatch::HostAction;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Viewer may not put items into the menu
        const PREVENT_PLACE = 1 << 0;
        /// Viewer may not take items out of the menu
        const PREVENT_TAKE = 1 << 1;
        /// Viewer may not swap items with the hotbar or cursor
        const PREVENT_SWAP = 1 << 2;
        /// Viewer may not drop items from the menu
        const PREVENT_DROP = 1 << 3;
        /// Viewer may not clone stacks (creative middle click)
        const PREVENT_CLONE = 1 << 4;
    }
}

impl Default for Modifiers {
    /// Fully locked menus are the common case
    fn default() -> Self {
        Modifiers::all()
    }
}

impl Modifiers {
    /// Whether the host's default handling of `action` must be cancelled
    pub fn blocks(&self, action: HostAction) -> bool {
        match action {
            HostAction::Place => self.contains(Modifiers::PREVENT_PLACE),
            HostAction::Pickup => self.contains(Modifiers::PREVENT_TAKE),
            HostAction::Swap => self.contains(Modifiers::PREVENT_SWAP),
            HostAction::Drop => self.contains(Modifiers::PREVENT_DROP),
            HostAction::Clone | HostAction::Other => self.contains(Modifiers::PREVENT_CLONE),
            HostAction::Nothing => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blocks_everything() {
        let modifiers = Modifiers::default();
        assert!(modifiers.blocks(HostAction::Pickup));
        assert!(modifiers.blocks(HostAction::Place));
        assert!(modifiers.blocks(HostAction::Other));
        assert!(!modifiers.blocks(HostAction::Nothing));
    }

    #[test]
    fn test_partial_modifiers() {
        let modifiers = Modifiers::PREVENT_TAKE | Modifiers::PREVENT_DROP;
        assert!(modifiers.blocks(HostAction::Pickup));
        assert!(modifiers.blocks(HostAction::Drop));
        assert!(!modifiers.blocks(HostAction::Place));
        assert!(!modifiers.blocks(HostAction::Swap));
    }
}
