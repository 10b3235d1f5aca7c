//! Handler context
//!
//! What a click handler sees: the view, the clicked slot, the raw interaction
//! and a set of mutation and navigation methods on the live instance. No lock
//! is held while the handler runs, so every method here may be called freely
//! and repeatedly.

use super::ClickEvent;
use crate::error::MenuResult;
use crate::menu::{Generation, MenuDefinition};
use crate::registry::{MenuInstance, MenuSource, ViewId};
use crate::slot::{Metadata, Slot};
use std::ops::Range;

/// Argument passed to every click handler
pub struct ClickContext<'a> {
    instance: &'a MenuInstance,
    slot: &'a Slot,
    event: &'a ClickEvent,
    close_requested: bool,
    open_request: Option<MenuSource>,
}

impl<'a> ClickContext<'a> {
    pub(crate) fn new(instance: &'a MenuInstance, slot: &'a Slot, event: &'a ClickEvent) -> Self {
        Self {
            instance,
            slot,
            event,
            close_requested: false,
            open_request: None,
        }
    }

    pub fn view(&self) -> &ViewId {
        self.instance.view()
    }

    /// The slot as it was when the click arrived
    pub fn slot(&self) -> &Slot {
        self.slot
    }

    pub fn event(&self) -> &ClickEvent {
        self.event
    }

    /// Host-supplied interaction extras
    pub fn extra(&self) -> &Metadata {
        &self.event.interaction.extra
    }

    /// Snapshot of the definition as it is now, including this handler's
    /// earlier writes
    pub fn definition(&self) -> MenuDefinition {
        self.instance.definition()
    }

    pub fn generation(&self) -> Generation {
        self.instance.generation()
    }

    pub fn set_slot(&mut self, index: usize, slot: Slot) -> MenuResult<()> {
        self.instance.set_slot(index, slot)
    }

    pub fn clear_slot(&mut self, index: usize) -> MenuResult<Option<Slot>> {
        self.instance.clear_slot(index)
    }

    pub fn fill(&mut self, range: Range<usize>, slot: &Slot) -> MenuResult<()> {
        self.instance.fill(range, slot)
    }

    /// Arbitrary edit of the live definition
    pub fn update<R>(&mut self, f: impl FnOnce(&mut MenuDefinition) -> MenuResult<R>) -> MenuResult<R> {
        self.instance.update(f)
    }

    pub fn refresh_updatable(&mut self) {
        self.instance.refresh_updatable()
    }

    pub fn current_page(&self) -> usize {
        self.instance.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.instance.page_count()
    }

    pub fn go_to_page(&mut self, page: usize) -> MenuResult<()> {
        self.instance.go_to_page(page)
    }

    pub fn next_page(&mut self) -> MenuResult<()> {
        self.instance.next_page()
    }

    pub fn previous_page(&mut self) -> MenuResult<()> {
        self.instance.previous_page()
    }

    pub fn set_items(&mut self, items: Vec<Slot>) -> MenuResult<()> {
        self.instance.set_items(items)
    }

    /// Close this view once the handler returns successfully
    pub fn close(&mut self) {
        self.close_requested = true;
    }

    /// Replace this view's menu once the handler returns successfully
    pub fn open_menu(&mut self, source: impl Into<MenuSource>) {
        self.open_request = Some(source.into());
    }

    pub(crate) fn into_requests(self) -> (bool, Option<MenuSource>) {
        (self.close_requested, self.open_request)
    }
}
