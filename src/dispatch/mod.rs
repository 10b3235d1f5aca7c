//! Click dispatch
//!
//! Turns host click callbacks into handler invocations against the live menu
//! of the clicked view.

pub mod clock;
pub mod context;
pub mod dispatcher;
pub mod event;

pub use clock::{Clock, ManualClock, SystemClock};
pub use context::ClickContext;
pub use dispatcher::{BusyPolicy, ClickDispatcher, DispatchOutcome, DispatchState};
pub use event::{ClickEvent, ClickKind, HostAction, Interaction};
