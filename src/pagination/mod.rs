//! Pagination controller
//!
//! Splits a list of content slots across pages of a fixed grid and renders
//! each page over the template's static region.

pub mod state;
pub mod template;

pub use state::PaginationState;
pub use template::{
    compute_page_count, NavBoundary, NavButton, OverflowStrategy, PageChange, PageChangeHandler,
    PaginationBuilder, PaginationTemplate,
};
