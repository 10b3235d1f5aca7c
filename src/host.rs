//! Host runtime bridge
//!
//! The engine never opens windows or draws items itself. The embedding plugin
//! implements `HostBridge` and hands it to the registry; failures inside click
//! handlers go to an `ErrorReporter`.

use crate::dispatch::ClickEvent;
use crate::error::MenuError;
use crate::menu::{CellUpdate, MenuDefinition};
use crate::registry::ViewId;
use crate::slot::Payload;

/// Capabilities the host runtime provides to the engine
pub trait HostBridge: Send + Sync {
    /// Refresh one cell of an open view; `None` clears it
    fn render_cell(&self, view: &ViewId, index: usize, payload: Option<&Payload>);

    /// Refresh a batch of cells that changed together
    fn render_cells(&self, view: &ViewId, cells: &[CellUpdate]) {
        for cell in cells {
            self.render_cell(view, cell.index, cell.payload.as_ref());
        }
    }

    /// Redraw the whole grid (initial open and page transitions)
    fn render_full(&self, view: &ViewId, menu: &MenuDefinition);

    /// Suppress the host's built-in effect of a click
    fn cancel_default_action(&self, event: &ClickEvent);

    /// Close the view on the viewer's side
    fn close_view(&self, view: &ViewId);
}

/// Sink for errors caught at the dispatch boundary
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &MenuError);
}

/// Reports errors through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorReporter;

impl ErrorReporter for LogErrorReporter {
    fn report(&self, error: &MenuError) {
        match error {
            MenuError::HandlerInvocation { source, .. } => {
                log::error!("{} (caused by: {:?})", error, source);
            }
            other => log::error!("{}", other),
        }
    }
}
