//! Menu definitions
//!
//! A definition is the sparse grid a viewer sees: title, dimensions, slots by
//! index and the update mode. Every structural change bumps the generation
//! counter. Dynamic definitions that are bound to an open view queue render
//! requests which the owning instance drains and forwards to the host.

use crate::error::{out_of_bounds, MenuError, MenuResult};
use crate::menu::{Animation, Frame, Modifiers};
use crate::registry::ViewId;
use crate::slot::{ExtraFields, Payload, Slot};
use crate::text::StyledText;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

/// Columns of a standard chest grid
pub const DEFAULT_WIDTH: usize = 9;
/// Widest grid the host can display
pub const MAX_WIDTH: usize = 9;
/// Tallest grid the host can display
pub const MAX_HEIGHT: usize = 6;

/// Whether structural changes are pushed to the viewer as they happen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Never push re-renders on mutation
    #[default]
    Static,
    /// Push a re-render for every structural change while open
    Dynamic,
}

/// Monotonic structural version of a definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// A single cell refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub index: usize,
    /// `None` clears the cell
    pub payload: Option<Payload>,
}

/// Render work queued by a bound dynamic definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRequest {
    /// One batch of cell refreshes, pushed together
    Cells(Vec<CellUpdate>),
    /// Whole grid refresh
    Full,
}

/// Callback run when the view showing a menu closes
pub type CloseHandler = Arc<dyn Fn(&ViewId) + Send + Sync>;

/// Grid of slots plus menu-level attributes
#[derive(Clone)]
pub struct MenuDefinition {
    title: StyledText,
    width: usize,
    height: usize,
    slots: BTreeMap<usize, Slot>,
    update_mode: UpdateMode,
    modifiers: Modifiers,
    generation: Generation,
    on_close: Option<CloseHandler>,
    extra: ExtraFields,
    animations: Vec<Animation>,
    bound: bool,
    pending: Vec<RenderRequest>,
}

impl MenuDefinition {
    /// Create an empty definition
    pub fn new(title: impl Into<StyledText>, width: usize, height: usize) -> MenuResult<Self> {
        if width == 0 || width > MAX_WIDTH || height == 0 || height > MAX_HEIGHT {
            return Err(MenuError::InvalidDimensions { width, height });
        }

        Ok(Self {
            title: title.into(),
            width,
            height,
            slots: BTreeMap::new(),
            update_mode: UpdateMode::Static,
            modifiers: Modifiers::default(),
            generation: Generation::default(),
            on_close: None,
            extra: ExtraFields::new(),
            animations: Vec::new(),
            bound: false,
            pending: Vec::new(),
        })
    }

    /// Create a standard nine-column menu
    pub fn chest(title: impl Into<StyledText>, rows: usize) -> MenuResult<Self> {
        Self::new(title, DEFAULT_WIDTH, rows)
    }

    pub fn with_update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = mode;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_on_close<F>(mut self, f: F) -> Self
    where
        F: Fn(&ViewId) + Send + Sync + 'static,
    {
        self.on_close = Some(Arc::new(f));
        self
    }

    /// Keep unrecognised document fields so that encoding writes them back
    pub fn with_extra_fields(mut self, extra: ExtraFields) -> Self {
        self.extra = extra;
        self
    }

    pub fn extra_fields(&self) -> &ExtraFields {
        &self.extra
    }

    pub fn title(&self) -> &StyledText {
        &self.title
    }

    /// Replace the title. Bound dynamic menus get a full refresh.
    pub fn set_title(&mut self, title: impl Into<StyledText>) {
        self.title = title.into();
        self.generation = self.generation.next();
        if self.pushes_renders() {
            self.pending.push(RenderRequest::Full);
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows of the grid, same as height
    pub fn rows(&self) -> usize {
        self.height
    }

    /// Number of cells in the grid
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn on_close(&self) -> Option<&CloseHandler> {
        self.on_close.as_ref()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.size()
    }

    fn check_index(&self, index: usize) -> MenuResult<()> {
        if self.contains_index(index) {
            Ok(())
        } else {
            Err(out_of_bounds(index, self.width, self.height))
        }
    }

    fn pushes_renders(&self) -> bool {
        self.bound && self.update_mode == UpdateMode::Dynamic
    }

    fn queue_cells(&mut self, cells: Vec<CellUpdate>) {
        if self.pushes_renders() && !cells.is_empty() {
            self.pending.push(RenderRequest::Cells(cells));
        }
    }

    /// Put a slot at `index`, replacing whatever was there
    pub fn set_slot(&mut self, index: usize, slot: Slot) -> MenuResult<()> {
        self.check_index(index)?;

        let slot = if slot.index() == index { slot } else { slot.at(index) };
        let payload = slot.payload().clone();
        self.slots.insert(index, slot);
        self.generation = self.generation.next();
        self.queue_cells(vec![CellUpdate {
            index,
            payload: Some(payload),
        }]);
        Ok(())
    }

    /// Put a slot at its own index
    pub fn insert(&mut self, slot: Slot) -> MenuResult<()> {
        self.set_slot(slot.index(), slot)
    }

    /// Write made by a caller that last looked at generation `seen`. The write
    /// always wins; a stale snapshot is only logged.
    pub fn set_slot_seen(&mut self, seen: Generation, index: usize, slot: Slot) -> MenuResult<()> {
        if seen < self.generation {
            log::warn!(
                "Stale write to slot {}: caller saw {}, menu is at {}",
                index,
                seen,
                self.generation
            );
        }
        self.set_slot(index, slot)
    }

    /// Remove the slot at `index`
    pub fn clear_slot(&mut self, index: usize) -> MenuResult<Option<Slot>> {
        self.check_index(index)?;

        let removed = self.slots.remove(&index);
        self.generation = self.generation.next();
        self.queue_cells(vec![CellUpdate {
            index,
            payload: None,
        }]);
        Ok(removed)
    }

    /// Get the slot at `index`; out-of-range reads are simply empty
    pub fn get_slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(&index)
    }

    pub fn has_slot(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    /// Copy `slot` into every cell of `range` as one structural change
    pub fn fill(&mut self, range: Range<usize>, slot: &Slot) -> MenuResult<()> {
        self.fill_indices(range, slot)
    }

    /// Copy `slot` into every listed cell as one structural change.
    ///
    /// All indices are validated before anything is written, so a bad index
    /// leaves the definition untouched.
    pub fn fill_indices(&mut self, indices: impl IntoIterator<Item = usize>, slot: &Slot) -> MenuResult<()> {
        let indices: Vec<usize> = indices.into_iter().collect();
        if let Some(&bad) = indices.iter().find(|&&i| !self.contains_index(i)) {
            return Err(out_of_bounds(bad, self.width, self.height));
        }
        if indices.is_empty() {
            return Ok(());
        }

        let mut cells = Vec::with_capacity(indices.len());
        for index in indices {
            self.slots.insert(index, slot.at(index));
            cells.push(CellUpdate {
                index,
                payload: Some(slot.payload().clone()),
            });
        }
        self.generation = self.generation.next();
        self.queue_cells(cells);
        Ok(())
    }

    /// Remove every slot
    pub fn clear_all(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        let cells = self
            .slots
            .keys()
            .map(|&index| CellUpdate { index, payload: None })
            .collect();
        self.slots.clear();
        self.generation = self.generation.next();
        self.queue_cells(cells);
    }

    /// Slots in ascending index order
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    /// Occupied indices in ascending order
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.keys().copied()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Attach an animation and start it
    pub fn add_animation(&mut self, mut animation: Animation) {
        animation.start();
        self.animations.push(animation);
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.add_animation(animation);
        self
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn is_animating(&self) -> bool {
        self.animations.iter().any(|a| a.is_running())
    }

    pub fn stop_animations(&mut self) {
        self.animations.iter_mut().for_each(Animation::stop);
    }

    /// Advance every running animation by one tick and write the frames that
    /// came due. Returns how many frames were shown.
    pub fn tick_animations(&mut self) -> MenuResult<usize> {
        let due: Vec<Frame> = self
            .animations
            .iter_mut()
            .filter_map(|a| a.tick().cloned())
            .collect();
        for frame in &due {
            self.apply_frame(frame)?;
        }
        Ok(due.len())
    }

    /// Write every slot of `frame` as one structural change. Bound menus push
    /// the frame whatever their update mode.
    pub fn apply_frame(&mut self, frame: &Frame) -> MenuResult<()> {
        if let Some(bad) = frame.slots().iter().find(|s| !self.contains_index(s.index())) {
            return Err(out_of_bounds(bad.index(), self.width, self.height));
        }
        if frame.is_empty() {
            return Ok(());
        }

        let cells: Vec<CellUpdate> = frame
            .slots()
            .iter()
            .map(|slot| CellUpdate {
                index: slot.index(),
                payload: Some(slot.payload().clone()),
            })
            .collect();
        for slot in frame.slots() {
            self.slots.insert(slot.index(), slot.clone());
        }
        self.generation = self.generation.next();
        if self.bound {
            self.pending.push(RenderRequest::Cells(cells));
        }
        Ok(())
    }

    /// Queue a refresh of every updatable slot
    pub fn refresh_updatable(&mut self) {
        let cells: Vec<CellUpdate> = self
            .slots
            .values()
            .filter(|s| s.is_updatable())
            .map(|s| CellUpdate {
                index: s.index(),
                payload: Some(s.payload().clone()),
            })
            .collect();
        if self.bound && !cells.is_empty() {
            self.pending.push(RenderRequest::Cells(cells));
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub(crate) fn bind(&mut self) {
        self.bound = true;
    }

    pub(crate) fn unbind(&mut self) {
        self.bound = false;
        self.pending.clear();
    }

    /// Drain queued render requests
    pub fn take_render_requests(&mut self) -> Vec<RenderRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Continue the generation sequence of a definition this one replaces
    pub(crate) fn advance_generation_past(&mut self, previous: Generation) {
        if self.generation <= previous {
            self.generation = previous.next();
        }
    }

    /// Same grid shape and attributes, no slots
    pub fn empty_like(&self) -> Self {
        Self {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            slots: BTreeMap::new(),
            update_mode: self.update_mode,
            modifiers: self.modifiers,
            generation: Generation::default(),
            on_close: self.on_close.clone(),
            extra: self.extra.clone(),
            animations: self.animations.clone(),
            bound: false,
            pending: Vec::new(),
        }
    }
}

impl std::fmt::Debug for MenuDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuDefinition")
            .field("title", &self.title)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("slots", &self.slots.len())
            .field("update_mode", &self.update_mode)
            .field("generation", &self.generation)
            .field("bound", &self.bound)
            .finish()
    }
}
