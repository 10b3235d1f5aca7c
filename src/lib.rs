pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod menu;
pub mod pagination;
pub mod registry;
pub mod slot;
pub mod text;

use std::sync::Arc;

pub use codec::{decode, decode_paginated, encode, encode_paginated, MenuDocument, PaginatedDocument, SlotDocument};
pub use config::{DispatcherConfig, MenuConfig, PaginationConfig};
pub use dispatch::{
    BusyPolicy, ClickContext, ClickDispatcher, ClickEvent, ClickKind, Clock, DispatchOutcome, HostAction,
    ManualClock, SystemClock,
};
pub use error::{MenuError, MenuResult};
pub use host::{ErrorReporter, HostBridge, LogErrorReporter};
pub use menu::{Animation, AnimationKind, Frame, MenuDefinition, MenuLayout, Modifiers, UpdateMode};
pub use pagination::{NavBoundary, OverflowStrategy, PaginationState, PaginationTemplate};
pub use registry::{MenuInstance, MenuRegistry, MenuSource, ViewId};
pub use slot::{handler, ClickHandler, Metadata, MetadataValue, Payload, Slot};
pub use text::StyledText;

/// Registry and dispatcher wired to one host
pub struct MenuEngine {
    config: MenuConfig,
    registry: Arc<MenuRegistry>,
    dispatcher: ClickDispatcher,
}

impl MenuEngine {
    pub fn new(host: Arc<dyn HostBridge>, config: MenuConfig) -> Self {
        Self::with_clock(host, Arc::new(SystemClock), config)
    }

    pub fn with_clock(host: Arc<dyn HostBridge>, clock: Arc<dyn Clock>, config: MenuConfig) -> Self {
        let registry = Arc::new(MenuRegistry::with_clock(host, clock));
        let dispatcher = ClickDispatcher::new(registry.clone(), config.dispatcher.clone());
        log::info!("Menu engine ready ({:?})", config);
        Self {
            config,
            registry,
            dispatcher,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.dispatcher = self.dispatcher.with_reporter(reporter);
        self
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<MenuRegistry> {
        &self.registry
    }

    pub fn dispatcher(&self) -> &ClickDispatcher {
        &self.dispatcher
    }

    /// Pagination builder preloaded with the configured policies
    pub fn paginate(&self, base: MenuDefinition) -> pagination::PaginationBuilder {
        PaginationTemplate::builder(base).config(&self.config.pagination)
    }

    pub fn open(&self, view: ViewId, source: impl Into<MenuSource>) -> MenuResult<Arc<MenuInstance>> {
        self.registry.open(view, source)
    }

    pub fn close(&self, view: &ViewId) -> bool {
        self.registry.close(view)
    }

    /// Host callback for clicks
    pub fn handle_click(&self, event: ClickEvent) -> DispatchOutcome {
        self.dispatcher.dispatch(event)
    }

    /// Host timer callback driving menu animations
    pub fn tick(&self) -> usize {
        self.registry.tick_all()
    }

    /// Host callback for windows closed by the viewer
    pub fn handle_view_closed(&self, view: &ViewId) -> bool {
        self.registry.on_view_closed(view)
    }
}
