//! Pagination state
//!
//! Tracks which page of a template a viewer is looking at. Every transition
//! returns a freshly rendered definition; the caller swaps it in.

use super::{PageChange, PaginationTemplate};
use crate::error::{page_out_of_range, MenuResult};
use crate::menu::MenuDefinition;
use crate::slot::Slot;
use std::sync::Arc;

/// Current page of a paginated menu
#[derive(Debug, Clone)]
pub struct PaginationState {
    template: Arc<PaginationTemplate>,
    current: usize,
}

impl PaginationState {
    /// Start on `page`
    pub fn new(template: Arc<PaginationTemplate>, page: usize) -> MenuResult<Self> {
        let page_count = template.page_count();
        if page >= page_count {
            return Err(page_out_of_range(page as i64, page_count));
        }
        Ok(Self { template, current: page })
    }

    pub fn template(&self) -> &Arc<PaginationTemplate> {
        &self.template
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.template.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.page_count()
    }

    /// Render the page currently shown
    pub fn render_current(&self) -> MenuResult<MenuDefinition> {
        self.template.render_page(self.current)
    }

    /// Move to `page` and render it
    pub fn go_to(&mut self, page: usize) -> MenuResult<MenuDefinition> {
        let rendered = self.template.render_page(page)?;
        let from = self.current;
        self.current = page;

        if from != page {
            log::debug!("Page change {} -> {} of {}", from, page, self.page_count());
            if let Some(hook) = self.template.on_page_change() {
                hook(&PageChange {
                    from,
                    to: page,
                    page_count: self.page_count(),
                });
            }
        }
        Ok(rendered)
    }

    pub fn next(&mut self) -> MenuResult<MenuDefinition> {
        self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> MenuResult<MenuDefinition> {
        match self.current.checked_sub(1) {
            Some(page) => self.go_to(page),
            None => Err(page_out_of_range(-1, self.page_count())),
        }
    }

    /// Swap the content items, clamping the current page to the new count
    pub fn set_items(&mut self, items: Vec<Slot>) -> MenuResult<MenuDefinition> {
        Arc::make_mut(&mut self.template).set_items(items);
        let last = self.page_count() - 1;
        if self.current > last {
            self.current = last;
        }
        self.render_current()
    }
}
