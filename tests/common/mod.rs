//! Shared fixtures for integration tests: a host that records every call and
//! a reporter that keeps every error.

#![allow(dead_code)]

use hearth_menus::menu::{CellUpdate, Generation};
use hearth_menus::{ClickEvent, ErrorReporter, HostBridge, MenuDefinition, MenuError, Payload, ViewId};
use parking_lot::Mutex;

/// One call the engine made into the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Cells(ViewId, Vec<(usize, Option<String>)>),
    Full(ViewId, Generation),
    Cancel(ViewId, usize),
    Close(ViewId),
}

#[derive(Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn full_renders(&self, view: &ViewId) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, HostCall::Full(v, _) if v == view))
            .count()
    }

    pub fn cell_renders(&self, view: &ViewId) -> Vec<(usize, Option<String>)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HostCall::Cells(v, cells) if v == view => Some(cells.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn cancels(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, HostCall::Cancel(..)))
            .count()
    }

    pub fn closes(&self, view: &ViewId) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, HostCall::Close(v) if v == view))
            .count()
    }
}

impl HostBridge for RecordingHost {
    fn render_cell(&self, view: &ViewId, index: usize, payload: Option<&Payload>) {
        self.render_cells(
            view,
            &[CellUpdate {
                index,
                payload: payload.cloned(),
            }],
        );
    }

    fn render_cells(&self, view: &ViewId, cells: &[CellUpdate]) {
        let cells = cells
            .iter()
            .map(|c| (c.index, c.payload.as_ref().map(|p| p.id().to_string())))
            .collect();
        self.calls.lock().push(HostCall::Cells(view.clone(), cells));
    }

    fn render_full(&self, view: &ViewId, menu: &MenuDefinition) {
        self.calls.lock().push(HostCall::Full(view.clone(), menu.generation()));
    }

    fn cancel_default_action(&self, event: &ClickEvent) {
        self.calls.lock().push(HostCall::Cancel(event.view.clone(), event.index));
    }

    fn close_view(&self, view: &ViewId) {
        self.calls.lock().push(HostCall::Close(view.clone()));
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    errors: Mutex<Vec<String>>,
    handler_failures: Mutex<usize>,
}

impl RecordingReporter {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    pub fn handler_failures(&self) -> usize {
        *self.handler_failures.lock()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &MenuError) {
        if matches!(error, MenuError::HandlerInvocation { .. }) {
            *self.handler_failures.lock() += 1;
        }
        self.errors.lock().push(error.to_string());
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
