//! Live menu instances
//!
//! An instance pairs the definition currently shown to one view with its
//! optional pagination state and dispatch bookkeeping. All access goes through
//! short `parking_lot` critical sections; nothing here holds a lock while user
//! code or the host runs.
//!
//! Lock order when both are needed: pagination, then definition.

use crate::dispatch::dispatcher::{DispatchCell, DispatchState};
use crate::error::{page_out_of_range, MenuError, MenuResult};
use crate::host::HostBridge;
use crate::menu::{CellUpdate, CloseHandler, Generation, MenuDefinition, RenderRequest};
use crate::pagination::PaginationState;
use crate::registry::ViewId;
use crate::slot::Slot;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Copy of the mutable state taken before a handler runs
pub(crate) struct Snapshot {
    definition: MenuDefinition,
    pagination: Option<PaginationState>,
}

/// One open menu bound to one view
pub struct MenuInstance {
    view: ViewId,
    host: Arc<dyn HostBridge>,
    pagination: Mutex<Option<PaginationState>>,
    definition: Mutex<MenuDefinition>,
    dispatch: Mutex<DispatchCell>,
    /// Last click of any kind
    last_interaction: Mutex<Option<Instant>>,
    /// Renders buffered while a handler runs; `None` outside a handler
    deferred: Mutex<Option<Vec<RenderRequest>>>,
    invalidated: AtomicBool,
    created_at: DateTime<Utc>,
    opened_at: Instant,
}

impl MenuInstance {
    pub(crate) fn new(
        view: ViewId,
        host: Arc<dyn HostBridge>,
        mut definition: MenuDefinition,
        pagination: Option<PaginationState>,
        opened_at: Instant,
    ) -> Self {
        definition.bind();
        Self {
            view,
            host,
            pagination: Mutex::new(pagination),
            definition: Mutex::new(definition),
            dispatch: Mutex::new(DispatchCell::default()),
            last_interaction: Mutex::new(None),
            deferred: Mutex::new(None),
            invalidated: AtomicBool::new(false),
            created_at: Utc::now(),
            opened_at,
        }
    }

    pub fn view(&self) -> &ViewId {
        &self.view
    }

    /// Wall-clock time the instance was opened
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn opened_at(&self) -> Instant {
        self.opened_at
    }

    pub fn last_interaction(&self) -> Option<Instant> {
        *self.last_interaction.lock()
    }

    /// How long the instance has gone without a click as of `now`
    pub fn idle_for(&self, now: Instant) -> Duration {
        let since = self.last_interaction().unwrap_or(self.opened_at);
        now.saturating_duration_since(since)
    }

    /// Record a click. Returns true when the previous click on this instance
    /// happened less than `cooldown` ago.
    pub(crate) fn touch(&self, now: Instant, cooldown: Option<Duration>) -> bool {
        let previous = self.last_interaction.lock().replace(now);
        match (cooldown, previous) {
            (Some(cooldown), Some(last)) => now.saturating_duration_since(last) < cooldown,
            _ => false,
        }
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::Acquire)
    }

    /// Mark the instance dead. Later renders are dropped.
    pub(crate) fn invalidate(&self) {
        if !self.invalidated.swap(true, Ordering::AcqRel) {
            self.definition.lock().unbind();
            *self.deferred.lock() = None;
        }
    }

    pub fn dispatch_state(&self) -> DispatchState {
        self.dispatch.lock().state
    }

    pub(crate) fn dispatch_cell(&self) -> &Mutex<DispatchCell> {
        &self.dispatch
    }

    /// Clone of the definition currently shown
    pub fn definition(&self) -> MenuDefinition {
        self.definition.lock().clone()
    }

    pub fn generation(&self) -> Generation {
        self.definition.lock().generation()
    }

    pub fn slot_at(&self, index: usize) -> Option<Slot> {
        self.definition.lock().get_slot(index).cloned()
    }

    pub(crate) fn on_close_handler(&self) -> Option<CloseHandler> {
        self.definition.lock().on_close().cloned()
    }

    /// Apply `f` to the live definition and push whatever it queued
    pub fn update<R>(&self, f: impl FnOnce(&mut MenuDefinition) -> MenuResult<R>) -> MenuResult<R> {
        let (result, requests) = {
            let mut definition = self.definition.lock();
            let result = f(&mut definition);
            (result, definition.take_render_requests())
        };
        self.emit(requests);
        result
    }

    pub fn set_slot(&self, index: usize, slot: Slot) -> MenuResult<()> {
        self.update(|d| d.set_slot(index, slot))
    }

    pub fn clear_slot(&self, index: usize) -> MenuResult<Option<Slot>> {
        self.update(|d| d.clear_slot(index))
    }

    pub fn fill(&self, range: Range<usize>, slot: &Slot) -> MenuResult<()> {
        self.update(|d| d.fill(range, slot))
    }

    /// Re-push every updatable slot, whatever the update mode
    pub fn refresh_updatable(&self) {
        let requests = {
            let mut definition = self.definition.lock();
            definition.refresh_updatable();
            definition.take_render_requests()
        };
        self.emit(requests);
    }

    /// Advance this menu's animations by one tick
    pub fn tick(&self) -> MenuResult<usize> {
        self.update(|d| d.tick_animations())
    }

    pub fn is_paginated(&self) -> bool {
        self.pagination.lock().is_some()
    }

    /// Current page; unpaginated menus are always on page 0
    pub fn current_page(&self) -> usize {
        self.pagination.lock().as_ref().map_or(0, |p| p.current_page())
    }

    pub fn page_count(&self) -> usize {
        self.pagination.lock().as_ref().map_or(1, |p| p.page_count())
    }

    /// Show `page` and push a full render.
    ///
    /// The template's page change hook runs inside this call and must not call
    /// back into the same instance.
    pub fn go_to_page(&self, page: usize) -> MenuResult<()> {
        self.transition(
            |state| state.go_to(page),
            || match page {
                0 => Ok(()),
                _ => Err(page_out_of_range(page as i64, 1)),
            },
        )
    }

    pub fn next_page(&self) -> MenuResult<()> {
        self.transition(|state| state.next(), || Err(page_out_of_range(1, 1)))
    }

    pub fn previous_page(&self) -> MenuResult<()> {
        self.transition(|state| state.previous(), || Err(page_out_of_range(-1, 1)))
    }

    /// Replace the paginated content items and redraw the current page
    pub fn set_items(&self, items: Vec<Slot>) -> MenuResult<()> {
        self.transition(
            |state| state.set_items(items),
            || Err(MenuError::InvalidLayout("menu is not paginated".to_string())),
        )
    }

    fn transition<F, U>(&self, f: F, unpaginated: U) -> MenuResult<()>
    where
        F: FnOnce(&mut PaginationState) -> MenuResult<MenuDefinition>,
        U: FnOnce() -> MenuResult<()>,
    {
        {
            let mut pagination = self.pagination.lock();
            let state = match pagination.as_mut() {
                Some(state) => state,
                None => return unpaginated(),
            };
            let rendered = f(state)?;
            self.swap_definition(rendered);
        }
        self.emit(vec![RenderRequest::Full]);
        Ok(())
    }

    fn swap_definition(&self, mut rendered: MenuDefinition) {
        let mut definition = self.definition.lock();
        rendered.advance_generation_past(definition.generation());
        rendered.take_render_requests();
        if definition.is_bound() {
            rendered.bind();
        }
        *definition = rendered;
    }

    /// Start buffering renders and snapshot the state a handler may touch
    pub(crate) fn begin(&self) -> Snapshot {
        let pagination = self.pagination.lock();
        let definition = self.definition.lock();
        *self.deferred.lock() = Some(Vec::new());
        Snapshot {
            definition: definition.clone(),
            pagination: pagination.clone(),
        }
    }

    /// Keep the handler's changes and push the buffered renders
    pub(crate) fn commit(&self) {
        let buffered = self.deferred.lock().take().unwrap_or_default();
        self.emit(coalesce(buffered));
    }

    /// Restore the snapshot and drop the buffered renders. The generation
    /// stays monotonic: if the handler changed anything, the restored
    /// definition continues past the handler's last generation.
    pub(crate) fn rollback(&self, snapshot: Snapshot) {
        let mut pagination = self.pagination.lock();
        let mut definition = self.definition.lock();
        *self.deferred.lock() = None;

        let reached = definition.generation();
        let bound = definition.is_bound();
        let mut restored = snapshot.definition;
        if reached > restored.generation() {
            restored.advance_generation_past(reached);
        }
        restored.take_render_requests();
        if !bound {
            restored.unbind();
        }
        *definition = restored;
        *pagination = snapshot.pagination;
    }

    /// Forward render requests to the host, or buffer them while a handler
    /// runs
    fn emit(&self, requests: Vec<RenderRequest>) {
        if requests.is_empty() || self.is_invalidated() {
            return;
        }
        {
            let mut deferred = self.deferred.lock();
            if let Some(buffer) = deferred.as_mut() {
                buffer.extend(requests);
                return;
            }
        }

        for request in requests {
            match request {
                RenderRequest::Cells(cells) => self.host.render_cells(&self.view, &cells),
                RenderRequest::Full => {
                    let snapshot = self.definition();
                    self.host.render_full(&self.view, &snapshot);
                }
            }
        }
    }

    /// Push the whole grid; used on open
    pub(crate) fn render_full(&self) {
        if self.is_invalidated() {
            return;
        }
        let snapshot = self.definition();
        self.host.render_full(&self.view, &snapshot);
    }
}

/// Collapse a handler's buffered renders: any full redraw covers every cell
/// batch, otherwise cell batches go out in order
fn coalesce(requests: Vec<RenderRequest>) -> Vec<RenderRequest> {
    if requests.iter().any(|r| matches!(r, RenderRequest::Full)) {
        vec![RenderRequest::Full]
    } else {
        let cells: Vec<CellUpdate> = requests
            .into_iter()
            .flat_map(|r| match r {
                RenderRequest::Cells(cells) => cells,
                RenderRequest::Full => Vec::new(),
            })
            .collect();
        if cells.is_empty() {
            Vec::new()
        } else {
            vec![RenderRequest::Cells(cells)]
        }
    }
}

impl std::fmt::Debug for MenuInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuInstance")
            .field("view", &self.view)
            .field("created_at", &self.created_at)
            .field("invalidated", &self.is_invalidated())
            .finish()
    }
}
