//! Click dispatcher
//!
//! Per-instance `Idle -> Dispatching -> Idle` state machine. At most one
//! handler runs per instance at a time; a click that arrives while one is
//! running is either queued (one deep, latest wins) or dropped. Different
//! instances never wait on each other.
//!
//! A handler that returns an error or panics leaves no trace: the definition
//! and pagination state are restored from a snapshot, renders it produced are
//! discarded, and the failure goes to the error reporter.

use super::{ClickContext, ClickEvent};
use crate::config::DispatcherConfig;
use crate::error::{panic_to_error, MenuError};
use crate::host::{ErrorReporter, LogErrorReporter};
use crate::registry::{MenuInstance, MenuRegistry};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Dispatch state of one instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchState {
    #[default]
    Idle,
    Dispatching,
}

/// What to do with a click that arrives while a handler is running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusyPolicy {
    /// Keep the latest such click and run it after the current one
    #[default]
    Queue,
    /// Discard it
    Drop,
}

/// Result of one `dispatch` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran and its changes were kept
    Handled,
    /// The cell had no handler
    Absorbed,
    /// A handler exists but the click came inside the cooldown
    CooledDown,
    /// Another handler was running; this click will run after it
    Queued,
    /// Another handler was running; this click was discarded
    Dropped,
    /// The handler failed and its changes were rolled back
    Failed,
    /// No live menu for the view
    NoInstance,
}

/// State plus the one-deep pending slot
#[derive(Debug, Default)]
pub(crate) struct DispatchCell {
    pub(crate) state: DispatchState,
    pub(crate) pending: Option<ClickEvent>,
}

/// Resets the cell to `Idle` if a host callback unwinds through the loop
struct BusyGuard<'a> {
    cell: &'a Mutex<DispatchCell>,
    armed: bool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut cell = self.cell.lock();
            cell.state = DispatchState::Idle;
            cell.pending = None;
        }
    }
}

/// Routes host clicks to slot handlers
pub struct ClickDispatcher {
    registry: Arc<MenuRegistry>,
    reporter: Arc<dyn ErrorReporter>,
    config: DispatcherConfig,
}

impl ClickDispatcher {
    pub fn new(registry: Arc<MenuRegistry>, config: DispatcherConfig) -> Self {
        Self {
            registry,
            reporter: Arc::new(LogErrorReporter),
            config,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn registry(&self) -> &Arc<MenuRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Entry point for every click the host delivers
    pub fn dispatch(&self, event: ClickEvent) -> DispatchOutcome {
        let instance = match self.registry.lookup(&event.view) {
            Some(instance) => instance,
            None => {
                log::debug!("Click on view {} with no open menu", event.view);
                return DispatchOutcome::NoInstance;
            }
        };

        let cell = instance.dispatch_cell();
        let busy_outcome = {
            let mut guard = cell.lock();
            if guard.state == DispatchState::Dispatching {
                Some(match self.config.busy_policy {
                    BusyPolicy::Queue => {
                        if guard.pending.replace(event.clone()).is_some() {
                            log::debug!("Replaced pending click on view {}", instance.view());
                        }
                        DispatchOutcome::Queued
                    }
                    BusyPolicy::Drop => {
                        log::debug!("Dropped click on busy view {}", instance.view());
                        DispatchOutcome::Dropped
                    }
                })
            } else {
                guard.state = DispatchState::Dispatching;
                None
            }
        };
        if let Some(outcome) = busy_outcome {
            self.registry.host().cancel_default_action(&event);
            return outcome;
        }

        let mut busy = BusyGuard { cell, armed: true };
        let outcome = self.run(&instance, &event);

        loop {
            let next = {
                let mut guard = cell.lock();
                match guard.pending.take() {
                    Some(next) => next,
                    None => {
                        guard.state = DispatchState::Idle;
                        busy.armed = false;
                        break;
                    }
                }
            };
            let queued = self.run(&instance, &next);
            log::debug!("Queued click on view {} slot {}: {:?}", next.view, next.index, queued);
        }

        outcome
    }

    /// One pass through resolve, cooldown, invoke
    fn run(&self, instance: &Arc<MenuInstance>, event: &ClickEvent) -> DispatchOutcome {
        if instance.is_invalidated() {
            return DispatchOutcome::NoInstance;
        }

        let host = self.registry.host();
        let now = self.registry.clock().now();
        let cooled = instance.touch(now, self.config.cooldown());

        let definition = instance.definition();
        let resolved = definition
            .get_slot(event.index)
            .and_then(|slot| slot.click_handler().map(|handler| (slot.clone(), handler.clone())));
        let (slot, handler) = match resolved {
            Some(resolved) => resolved,
            None => {
                if definition.modifiers().blocks(event.interaction.action) {
                    host.cancel_default_action(event);
                }
                return DispatchOutcome::Absorbed;
            }
        };

        host.cancel_default_action(event);
        if cooled {
            log::debug!("Click on view {} slot {} inside cooldown", event.view, event.index);
            return DispatchOutcome::CooledDown;
        }

        let snapshot = instance.begin();
        let mut ctx = ClickContext::new(instance, &slot, event);
        let result = catch_unwind(AssertUnwindSafe(|| handler(&mut ctx)));
        let (close_requested, open_request) = ctx.into_requests();

        let failure = match result {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(err),
            Err(payload) => Some(panic_to_error(payload)),
        };

        if let Some(source) = failure {
            instance.rollback(snapshot);
            self.reporter.report(&MenuError::HandlerInvocation {
                view: event.view.clone(),
                index: event.index,
                source,
            });
            return DispatchOutcome::Failed;
        }

        instance.commit();

        if let Some(source) = open_request {
            match self.registry.replace(instance, source) {
                Ok(Some(_)) => {}
                Ok(None) => log::debug!(
                    "Menu on view {} was replaced during its handler; open request ignored",
                    event.view
                ),
                Err(err) => self.reporter.report(&err),
            }
        } else if close_requested {
            self.registry.close_instance(instance);
        }

        DispatchOutcome::Handled
    }
}

impl std::fmt::Debug for ClickDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickDispatcher")
            .field("config", &self.config)
            .field("open_menus", &self.registry.len())
            .finish()
    }
}
