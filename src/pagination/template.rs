//! Pagination templates
//!
//! A template describes how a logical list of content slots is laid out over
//! several pages of the same grid. Cells in the static region (headers,
//! borders, navigation row) are copied unchanged to every page; the remaining
//! cells, in ascending index order, form the content region.

use crate::config::PaginationConfig;
use crate::error::{out_of_bounds, page_out_of_range, MenuResult};
use crate::menu::filler::row_indices;
use crate::menu::MenuDefinition;
use crate::slot::{handler, ExtraFields, Slot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// What happens to items that do not fit the page count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowStrategy {
    /// Keep a fixed page count and drop the surplus
    Truncate,
    /// Grow the page count until every item fits
    #[default]
    ExtraPage,
}

/// How navigation buttons look when there is nowhere to go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavBoundary {
    /// Leave the button's cell empty
    #[default]
    Hide,
    /// Show the button without a handler; clicks are absorbed
    Inert,
}

/// Page change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub from: usize,
    pub to: usize,
    pub page_count: usize,
}

/// Callback fired after every page transition
pub type PageChangeHandler = Arc<dyn Fn(&PageChange) + Send + Sync>;

/// Position and look of a navigation button
#[derive(Debug, Clone)]
pub struct NavButton {
    pub index: usize,
    pub slot: Slot,
}

/// Number of pages needed for `item_count` items, never less than one
pub fn compute_page_count(item_count: usize, capacity: usize) -> usize {
    if capacity == 0 {
        return 1;
    }
    item_count.div_ceil(capacity).max(1)
}

/// Shared description of a paginated menu
#[derive(Clone)]
pub struct PaginationTemplate {
    base: MenuDefinition,
    static_region: BTreeSet<usize>,
    content_cells: Vec<usize>,
    items: Vec<Slot>,
    previous: Option<NavButton>,
    next: Option<NavButton>,
    overflow: OverflowStrategy,
    fixed_page_count: Option<usize>,
    boundary: NavBoundary,
    on_page_change: Option<PageChangeHandler>,
    extra: ExtraFields,
}

impl PaginationTemplate {
    /// Start building a template over `base`
    pub fn builder(base: MenuDefinition) -> PaginationBuilder {
        PaginationBuilder {
            base,
            static_region: BTreeSet::new(),
            items: Vec::new(),
            previous: None,
            next: None,
            overflow: OverflowStrategy::default(),
            fixed_page_count: None,
            boundary: NavBoundary::default(),
            on_page_change: None,
            extra: ExtraFields::new(),
        }
    }

    pub fn base(&self) -> &MenuDefinition {
        &self.base
    }

    /// Content cells per page
    pub fn capacity(&self) -> usize {
        self.content_cells.len()
    }

    /// Content cell indices in fill order
    pub fn content_cells(&self) -> &[usize] {
        &self.content_cells
    }

    /// Static region including navigation cells, ascending
    pub fn static_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.static_region.iter().copied()
    }

    pub fn previous_button(&self) -> Option<&NavButton> {
        self.previous.as_ref()
    }

    pub fn next_button(&self) -> Option<&NavButton> {
        self.next.as_ref()
    }

    pub fn fixed_page_count(&self) -> Option<usize> {
        self.fixed_page_count
    }

    pub fn extra_fields(&self) -> &ExtraFields {
        &self.extra
    }

    pub fn is_static(&self, index: usize) -> bool {
        self.static_region.contains(&index)
    }

    pub fn items(&self) -> &[Slot] {
        &self.items
    }

    pub fn overflow(&self) -> OverflowStrategy {
        self.overflow
    }

    pub fn boundary(&self) -> NavBoundary {
        self.boundary
    }

    pub fn on_page_change(&self) -> Option<&PageChangeHandler> {
        self.on_page_change.as_ref()
    }

    /// Replace the content items
    pub fn set_items(&mut self, items: Vec<Slot>) {
        self.items = items;
    }

    /// Page count after applying the overflow strategy
    pub fn page_count(&self) -> usize {
        let required = compute_page_count(self.items.len(), self.capacity());
        match (self.overflow, self.fixed_page_count) {
            (_, None) => required,
            (OverflowStrategy::Truncate, Some(fixed)) => fixed.max(1),
            (OverflowStrategy::ExtraPage, Some(fixed)) => fixed.max(required),
        }
    }

    /// Items that can be shown on some page
    pub fn visible_item_count(&self) -> usize {
        self.items.len().min(self.page_count() * self.capacity())
    }

    /// Range of item positions shown on `page`
    pub fn page_range(&self, page: usize) -> std::ops::Range<usize> {
        let visible = self.visible_item_count();
        let start = (page * self.capacity()).min(visible);
        let end = (start + self.capacity()).min(visible);
        start..end
    }

    /// Materialise `page` as a standalone definition
    pub fn render_page(&self, page: usize) -> MenuResult<MenuDefinition> {
        let page_count = self.page_count();
        if page >= page_count {
            return Err(page_out_of_range(page as i64, page_count));
        }

        let mut menu = self.base.empty_like();

        for &index in &self.static_region {
            if let Some(slot) = self.base.get_slot(index) {
                menu.set_slot(index, slot.clone())?;
            }
        }

        if let Some(button) = &self.previous {
            let target = page.checked_sub(1);
            self.place_button(&mut menu, button, target)?;
        }
        if let Some(button) = &self.next {
            let target = Some(page + 1).filter(|&p| p < page_count);
            self.place_button(&mut menu, button, target)?;
        }

        let range = self.page_range(page);
        for (&cell, item) in self.content_cells.iter().zip(&self.items[range]) {
            menu.set_slot(cell, item.clone())?;
        }

        Ok(menu)
    }

    fn place_button(&self, menu: &mut MenuDefinition, button: &NavButton, target: Option<usize>) -> MenuResult<()> {
        match (target, self.boundary) {
            (Some(target), _) => {
                let nav = handler(move |ctx| {
                    ctx.go_to_page(target)?;
                    Ok(())
                });
                menu.set_slot(button.index, button.slot.with_handler_replaced(Some(nav)))
            }
            (None, NavBoundary::Inert) => menu.set_slot(button.index, button.slot.with_handler_replaced(None)),
            (None, NavBoundary::Hide) => Ok(()),
        }
    }
}

impl std::fmt::Debug for PaginationTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationTemplate")
            .field("base", &self.base)
            .field("static_region", &self.static_region)
            .field("capacity", &self.capacity())
            .field("items", &self.items.len())
            .field("overflow", &self.overflow)
            .field("fixed_page_count", &self.fixed_page_count)
            .field("boundary", &self.boundary)
            .finish()
    }
}

/// Builder for `PaginationTemplate`
pub struct PaginationBuilder {
    base: MenuDefinition,
    static_region: BTreeSet<usize>,
    items: Vec<Slot>,
    previous: Option<NavButton>,
    next: Option<NavButton>,
    overflow: OverflowStrategy,
    fixed_page_count: Option<usize>,
    boundary: NavBoundary,
    on_page_change: Option<PageChangeHandler>,
    extra: ExtraFields,
}

impl PaginationBuilder {
    /// Reserve whole rows (0-based) for the static region
    pub fn static_rows(mut self, rows: &[usize]) -> Self {
        let width = self.base.width();
        for &row in rows {
            self.static_region.extend(row_indices(width, row));
        }
        self
    }

    /// Reserve individual cells for the static region
    pub fn static_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.static_region.extend(indices);
        self
    }

    /// Reserve every cell the base definition already occupies
    pub fn static_from_base(mut self) -> Self {
        let occupied: Vec<usize> = self.base.occupied().collect();
        self.static_region.extend(occupied);
        self
    }

    pub fn items(mut self, items: Vec<Slot>) -> Self {
        self.items = items;
        self
    }

    /// Button that goes to the previous page; its handler is generated
    pub fn previous_button(mut self, index: usize, slot: Slot) -> Self {
        self.previous = Some(NavButton { index, slot });
        self
    }

    /// Button that goes to the next page; its handler is generated
    pub fn next_button(mut self, index: usize, slot: Slot) -> Self {
        self.next = Some(NavButton { index, slot });
        self
    }

    pub fn overflow(mut self, overflow: OverflowStrategy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Ask for a fixed number of pages
    pub fn fixed_pages(mut self, pages: usize) -> Self {
        self.fixed_page_count = Some(pages);
        self
    }

    pub fn boundary(mut self, boundary: NavBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Take overflow and boundary policies from configuration
    pub fn config(self, config: &PaginationConfig) -> Self {
        self.overflow(config.overflow).boundary(config.boundary)
    }

    /// Unrecognised fields from a stored document
    pub fn extra_fields(mut self, extra: ExtraFields) -> Self {
        self.extra = extra;
        self
    }

    pub fn on_page_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&PageChange) + Send + Sync + 'static,
    {
        self.on_page_change = Some(Arc::new(f));
        self
    }

    /// Validate indices and compute the content region
    pub fn build(mut self) -> MenuResult<PaginationTemplate> {
        let (width, height, size) = (self.base.width(), self.base.height(), self.base.size());

        for button in self.previous.iter().chain(self.next.iter()) {
            if button.index >= size {
                return Err(out_of_bounds(button.index, width, height));
            }
        }
        if let Some(&bad) = self.static_region.iter().find(|&&i| i >= size) {
            return Err(out_of_bounds(bad, width, height));
        }

        let nav_cells: Vec<usize> = self
            .previous
            .iter()
            .chain(self.next.iter())
            .map(|b| b.index)
            .collect();
        self.static_region.extend(nav_cells);

        let content_cells: Vec<usize> = (0..size).filter(|i| !self.static_region.contains(i)).collect();

        let dropped = self
            .base
            .occupied()
            .filter(|i| !self.static_region.contains(i))
            .count();
        if dropped > 0 {
            log::debug!("{} base slots sit in the content region and will be covered by pages", dropped);
        }

        Ok(PaginationTemplate {
            base: self.base,
            static_region: self.static_region,
            content_cells,
            items: self.items,
            previous: self.previous,
            next: self.next,
            overflow: self.overflow,
            fixed_page_count: self.fixed_page_count,
            boundary: self.boundary,
            on_page_change: self.on_page_change,
            extra: self.extra,
        })
    }
}
