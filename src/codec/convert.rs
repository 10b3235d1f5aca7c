//! Conversion between live definitions and documents

use super::document::{
    check_version, AnimationDocument, MenuDocument, NavDocument, PaginatedDocument, SlotDocument, CURRENT_VERSION,
};
use crate::error::{out_of_bounds, MenuError, MenuResult};
use crate::menu::{Animation, Frame, MenuDefinition, Modifiers};
use crate::pagination::{NavButton, PaginationTemplate};
use crate::slot::{ClickHandler, Slot};

/// Capture the layout of `menu`. Handlers, the updatable flag and animation
/// progress are not stored.
pub fn encode(menu: &MenuDefinition) -> MenuDocument {
    let modifiers = menu.modifiers();
    MenuDocument {
        version: CURRENT_VERSION,
        width: menu.width(),
        height: menu.height(),
        title: menu.title().clone(),
        update_mode: menu.update_mode(),
        modifiers: (modifiers != Modifiers::default())
            .then(|| modifiers.iter_names().map(|(name, _)| name.to_string()).collect()),
        slots: menu.slots().map(slot_document).collect(),
        animations: menu.animations().iter().map(animation_document).collect(),
        extra: menu.extra_fields().clone(),
    }
}

/// Rebuild a definition, asking `resolver` for each slot's handler
pub fn decode<R>(document: &MenuDocument, resolver: R) -> MenuResult<MenuDefinition>
where
    R: Fn(&SlotDocument) -> Option<ClickHandler>,
{
    check_version(document.version)?;

    let mut menu = MenuDefinition::new(document.title.clone(), document.width, document.height)?
        .with_update_mode(document.update_mode)
        .with_modifiers(decode_modifiers(document.modifiers.as_deref())?)
        .with_extra_fields(document.extra.clone());

    for stored in &document.slots {
        if menu.has_slot(stored.index) {
            return Err(MenuError::InvalidLayout(format!(
                "slot {} appears twice",
                stored.index
            )));
        }
        menu.set_slot(stored.index, slot_from_document(stored, &resolver))?;
    }

    for stored in &document.animations {
        let frames = stored
            .frames
            .iter()
            .map(|frame| {
                frame.iter().try_fold(Frame::new(), |frame, slot| {
                    if !menu.contains_index(slot.index) {
                        return Err(out_of_bounds(slot.index, menu.width(), menu.height()));
                    }
                    Ok(frame.slot(slot_from_document(slot, &resolver)))
                })
            })
            .collect::<MenuResult<Vec<Frame>>>()?;
        menu.add_animation(Animation::new(stored.kind, stored.start_delay, stored.interval, frames)?);
    }

    Ok(menu)
}

/// Rebuild a definition with no handlers
pub fn decode_without_handlers(document: &MenuDocument) -> MenuResult<MenuDefinition> {
    decode(document, |_| None)
}

/// Capture a pagination template. The page change hook and the generated
/// navigation handlers are not stored.
pub fn encode_paginated(template: &PaginationTemplate) -> PaginatedDocument {
    let nav = |button: &NavButton| NavDocument {
        index: button.index,
        slot: slot_document(&button.slot),
    };

    PaginatedDocument {
        version: CURRENT_VERSION,
        base: encode(template.base()),
        static_cells: template.static_cells().collect(),
        previous: template.previous_button().map(nav),
        next: template.next_button().map(nav),
        overflow: template.overflow(),
        boundary: template.boundary(),
        fixed_pages: template.fixed_page_count(),
        items: template.items().iter().map(slot_document).collect(),
        extra: template.extra_fields().clone(),
    }
}

/// Rebuild a pagination template, asking `resolver` for the handlers of base
/// slots and content items
pub fn decode_paginated<R>(document: &PaginatedDocument, resolver: R) -> MenuResult<PaginationTemplate>
where
    R: Fn(&SlotDocument) -> Option<ClickHandler>,
{
    check_version(document.version)?;

    let base = decode(&document.base, &resolver)?;
    let items = document
        .items
        .iter()
        .map(|stored| slot_from_document(stored, &resolver))
        .collect();

    let mut builder = PaginationTemplate::builder(base)
        .static_indices(document.static_cells.iter().copied())
        .items(items)
        .overflow(document.overflow)
        .boundary(document.boundary)
        .extra_fields(document.extra.clone());
    if let Some(nav) = &document.previous {
        builder = builder.previous_button(nav.index, slot_from_document(&nav.slot, &no_handler));
    }
    if let Some(nav) = &document.next {
        builder = builder.next_button(nav.index, slot_from_document(&nav.slot, &no_handler));
    }
    if let Some(pages) = document.fixed_pages {
        builder = builder.fixed_pages(pages);
    }
    builder.build()
}

/// Navigation buttons get generated handlers when a page is rendered
fn no_handler(_: &SlotDocument) -> Option<ClickHandler> {
    None
}

fn slot_document(slot: &Slot) -> SlotDocument {
    SlotDocument {
        index: slot.index(),
        payload: slot.payload().id().to_string(),
        metadata: slot.meta_map().clone(),
        extra: slot.extra().clone(),
    }
}

fn slot_from_document<R>(stored: &SlotDocument, resolver: &R) -> Slot
where
    R: Fn(&SlotDocument) -> Option<ClickHandler>,
{
    let slot = Slot::new(stored.index, stored.payload.as_str())
        .metadata(stored.metadata.clone())
        .extra_fields(stored.extra.clone());
    match resolver(stored) {
        Some(handler) => slot.handler(handler),
        None => slot,
    }
}

fn animation_document(animation: &Animation) -> AnimationDocument {
    AnimationDocument {
        kind: animation.kind(),
        start_delay: animation.start_delay(),
        interval: animation.interval(),
        frames: animation
            .frames()
            .iter()
            .map(|frame| frame.slots().iter().map(slot_document).collect())
            .collect(),
    }
}

fn decode_modifiers(names: Option<&[String]>) -> MenuResult<Modifiers> {
    let Some(names) = names else {
        return Ok(Modifiers::default());
    };
    names.iter().try_fold(Modifiers::empty(), |acc, name| {
        Modifiers::from_name(name)
            .map(|flag| acc | flag)
            .ok_or_else(|| MenuError::InvalidLayout(format!("unknown modifier {}", name)))
    })
}
