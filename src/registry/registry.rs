//! Menu instance registry
//!
//! Process-wide table of open menus keyed by view. At most one live instance
//! per view; opening a new menu on a view evicts the old one. Per-key atomicity
//! comes from the `DashMap` shard locks.

use super::{MenuInstance, ViewId};
use crate::dispatch::{Clock, SystemClock};
use crate::error::{MenuError, MenuResult};
use crate::host::HostBridge;
use crate::menu::MenuDefinition;
use crate::pagination::{PaginationState, PaginationTemplate};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

/// What to show when a view opens
#[derive(Debug, Clone)]
pub enum MenuSource {
    /// A single fixed definition
    Single(MenuDefinition),
    /// A paginated template starting on `page`
    Paginated {
        template: Arc<PaginationTemplate>,
        page: usize,
    },
}

impl MenuSource {
    pub fn paginated(template: impl Into<Arc<PaginationTemplate>>, page: usize) -> Self {
        MenuSource::Paginated {
            template: template.into(),
            page,
        }
    }
}

impl From<MenuDefinition> for MenuSource {
    fn from(definition: MenuDefinition) -> Self {
        MenuSource::Single(definition)
    }
}

impl From<PaginationTemplate> for MenuSource {
    fn from(template: PaginationTemplate) -> Self {
        MenuSource::paginated(template, 0)
    }
}

impl From<Arc<PaginationTemplate>> for MenuSource {
    fn from(template: Arc<PaginationTemplate>) -> Self {
        MenuSource::paginated(template, 0)
    }
}

/// Table of open menus
pub struct MenuRegistry {
    instances: DashMap<ViewId, Arc<MenuInstance>>,
    host: Arc<dyn HostBridge>,
    clock: Arc<dyn Clock>,
}

impl MenuRegistry {
    pub fn new(host: Arc<dyn HostBridge>) -> Self {
        Self::with_clock(host, Arc::new(SystemClock))
    }

    pub fn with_clock(host: Arc<dyn HostBridge>, clock: Arc<dyn Clock>) -> Self {
        Self {
            instances: DashMap::new(),
            host,
            clock,
        }
    }

    pub fn host(&self) -> &Arc<dyn HostBridge> {
        &self.host
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Show `source` on `view`, replacing whatever was open there
    pub fn open(&self, view: ViewId, source: impl Into<MenuSource>) -> MenuResult<Arc<MenuInstance>> {
        let instance = self.build(view.clone(), source.into())?;

        if let Some(previous) = self.instances.insert(view.clone(), instance.clone()) {
            log::debug!("Evicting menu on view {} opened at {}", view, previous.created_at());
            self.release(&previous);
        }

        log::info!("Opened menu on view {}", view);
        instance.render_full();
        Ok(instance)
    }

    /// Show `source` in place of `current`, but only while `current` is still
    /// the instance registered for its view. Returns `None` when it was
    /// already replaced or closed.
    pub fn replace(
        &self,
        current: &Arc<MenuInstance>,
        source: impl Into<MenuSource>,
    ) -> MenuResult<Option<Arc<MenuInstance>>> {
        let view = current.view().clone();
        let instance = self.build(view.clone(), source.into())?;

        let previous = match self.instances.entry(view.clone()) {
            Entry::Occupied(mut entry) if Arc::ptr_eq(entry.get(), current) => {
                Some(entry.insert(instance.clone()))
            }
            _ => None,
        };

        match previous {
            Some(previous) => {
                self.release(&previous);
                log::info!("Replaced menu on view {}", view);
                instance.render_full();
                Ok(Some(instance))
            }
            None => Ok(None),
        }
    }

    fn build(&self, view: ViewId, source: MenuSource) -> MenuResult<Arc<MenuInstance>> {
        let (definition, pagination) = match source {
            MenuSource::Single(definition) => (definition, None),
            MenuSource::Paginated { template, page } => {
                let state = PaginationState::new(template, page)?;
                (state.render_current()?, Some(state))
            }
        };

        Ok(Arc::new(MenuInstance::new(
            view,
            self.host.clone(),
            definition,
            pagination,
            self.clock.now(),
        )))
    }

    /// Close the menu on `view` and tell the host to close the window.
    /// Returns false when nothing was open.
    pub fn close(&self, view: &ViewId) -> bool {
        match self.instances.remove(view) {
            Some((_, instance)) => {
                self.host.close_view(view);
                self.release(&instance);
                log::info!("Closed menu on view {}", view);
                true
            }
            None => false,
        }
    }

    /// Close `instance` only if it is still the one registered for its view
    pub fn close_instance(&self, instance: &Arc<MenuInstance>) -> bool {
        let view = instance.view();
        match self.instances.remove_if(view, |_, current| Arc::ptr_eq(current, instance)) {
            Some((_, removed)) => {
                self.host.close_view(view);
                self.release(&removed);
                true
            }
            None => false,
        }
    }

    /// The host closed the window on its own
    pub fn on_view_closed(&self, view: &ViewId) -> bool {
        match self.instances.remove(view) {
            Some((_, instance)) => {
                self.release(&instance);
                log::debug!("View {} closed by host", view);
                true
            }
            None => false,
        }
    }

    /// Live instance for `view`
    pub fn lookup(&self, view: &ViewId) -> Option<Arc<MenuInstance>> {
        self.instances
            .get(view)
            .map(|entry| entry.value().clone())
            .filter(|instance| !instance.is_invalidated())
    }

    /// Like `lookup`, but a missing view is an error
    pub fn require(&self, view: &ViewId) -> MenuResult<Arc<MenuInstance>> {
        self.lookup(view)
            .ok_or_else(|| MenuError::UnknownInstance(view.clone()))
    }

    pub fn is_open(&self, view: &ViewId) -> bool {
        self.lookup(view).is_some()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn views(&self) -> Vec<ViewId> {
        self.instances.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Close every open menu
    pub fn close_all(&self) -> usize {
        self.views().iter().filter(|view| self.close(view)).count()
    }

    /// Advance the animations of every open menu by one tick. Returns the
    /// number of frames shown.
    pub fn tick_all(&self) -> usize {
        let open: Vec<Arc<MenuInstance>> = self.instances.iter().map(|entry| entry.value().clone()).collect();
        open.iter()
            .map(|instance| match instance.tick() {
                Ok(shown) => shown,
                Err(err) => {
                    log::warn!("Animation frame on view {} rejected: {}", instance.view(), err);
                    0
                }
            })
            .sum()
    }

    /// Close menus that have seen no click for at least `max_idle`
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = self.clock.now();
        let idle: Vec<Arc<MenuInstance>> = self
            .instances
            .iter()
            .filter(|entry| entry.value().idle_for(now) >= max_idle)
            .map(|entry| entry.value().clone())
            .collect();

        let evicted = idle.iter().filter(|instance| self.close_instance(instance)).count();
        if evicted > 0 {
            log::info!("Evicted {} idle menus", evicted);
        }
        evicted
    }

    /// Invalidate a removed instance and run its close hook. Must be called
    /// with no map guard held.
    fn release(&self, instance: &MenuInstance) {
        instance.invalidate();
        if let Some(on_close) = instance.on_close_handler() {
            on_close(instance.view());
        }
    }
}

impl std::fmt::Debug for MenuRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuRegistry")
            .field("open", &self.instances.len())
            .finish()
    }
}
