/// Menu fillers
///
/// Free functions that decorate a definition in bulk. Each call is one
/// structural change: a single generation bump and a single render batch.

use crate::error::{out_of_bounds, MenuResult};
use crate::menu::MenuDefinition;
use crate::slot::Slot;

/// Side of the grid for `fill_side`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
    LeftRight,
}

/// Indices on the outer ring of a grid
pub fn border_indices(width: usize, height: usize) -> Vec<usize> {
    (0..width * height)
        .filter(|&i| {
            let row = i / width;
            let col = i % width;
            row == 0 || row + 1 == height || col == 0 || col + 1 == width
        })
        .collect()
}

/// Indices of one row
pub fn row_indices(width: usize, row: usize) -> Vec<usize> {
    (row * width..(row + 1) * width).collect()
}

/// Indices of one column
pub fn column_indices(width: usize, height: usize, column: usize) -> Vec<usize> {
    (0..height).map(|row| row * width + column).collect()
}

/// Put `slot` into every empty cell
pub fn fill_empty(menu: &mut MenuDefinition, slot: &Slot) -> MenuResult<()> {
    let empty: Vec<usize> = (0..menu.size()).filter(|&i| !menu.has_slot(i)).collect();
    menu.fill_indices(empty, slot)
}

/// Put `slot` into the empty cells of the outer ring
pub fn fill_borders(menu: &mut MenuDefinition, slot: &Slot) -> MenuResult<()> {
    let cells: Vec<usize> = border_indices(menu.width(), menu.height())
        .into_iter()
        .filter(|&i| !menu.has_slot(i))
        .collect();
    menu.fill_indices(cells, slot)
}

/// Fill a whole row (0-based)
pub fn fill_row(menu: &mut MenuDefinition, row: usize, slot: &Slot) -> MenuResult<()> {
    if row >= menu.height() {
        return Err(out_of_bounds(row * menu.width(), menu.width(), menu.height()));
    }
    menu.fill_indices(row_indices(menu.width(), row), slot)
}

/// Fill a whole column (0-based)
pub fn fill_column(menu: &mut MenuDefinition, column: usize, slot: &Slot) -> MenuResult<()> {
    if column >= menu.width() {
        return Err(out_of_bounds(column, menu.width(), menu.height()));
    }
    menu.fill_indices(column_indices(menu.width(), menu.height(), column), slot)
}

/// Fill one or two sides of the grid
pub fn fill_side(menu: &mut MenuDefinition, side: Side, slot: &Slot) -> MenuResult<()> {
    let (width, height) = (menu.width(), menu.height());
    let cells = match side {
        Side::Top => row_indices(width, 0),
        Side::Bottom => row_indices(width, height - 1),
        Side::Left => column_indices(width, height, 0),
        Side::Right => column_indices(width, height, width - 1),
        Side::LeftRight => {
            let mut cells = column_indices(width, height, 0);
            if width > 1 {
                cells.extend(column_indices(width, height, width - 1));
            }
            cells
        }
    };
    menu.fill_indices(cells, slot)
}

/// Fill a rectangle starting at (`row`, `column`)
pub fn fill_area(
    menu: &mut MenuDefinition,
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
    slot: &Slot,
) -> MenuResult<()> {
    let width = menu.width();
    if column + columns > width || row + rows > menu.height() {
        let last = (row + rows).saturating_sub(1) * width + (column + columns).saturating_sub(1);
        return Err(out_of_bounds(last, width, menu.height()));
    }

    let cells = (row..row + rows).flat_map(|r| (column..column + columns).map(move |c| r * width + c));
    menu.fill_indices(cells, slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane() -> Slot {
        Slot::new(0, "pane")
    }

    #[test]
    fn test_border_count() {
        assert_eq!(border_indices(9, 6).len(), 26);
        assert_eq!(border_indices(9, 1).len(), 9);
    }

    #[test]
    fn test_fill_borders_skips_occupied() {
        let mut menu = MenuDefinition::chest("t", 3).unwrap();
        menu.set_slot(0, Slot::new(0, "star")).unwrap();
        fill_borders(&mut menu, &pane()).unwrap();

        assert_eq!(menu.get_slot(0).unwrap().payload().id(), "star");
        assert_eq!(menu.get_slot(8).unwrap().payload().id(), "pane");
        assert!(menu.get_slot(13).is_none());
        assert_eq!(menu.slot_count(), 20);
    }

    #[test]
    fn test_fill_empty_single_generation() {
        let mut menu = MenuDefinition::chest("t", 2).unwrap();
        menu.set_slot(4, Slot::new(4, "star")).unwrap();
        let before = menu.generation();
        fill_empty(&mut menu, &pane()).unwrap();
        assert_eq!(menu.generation(), before.next());
        assert_eq!(menu.slot_count(), 18);
    }

    #[test]
    fn test_sides_and_area() {
        let mut menu = MenuDefinition::chest("t", 4).unwrap();
        fill_side(&mut menu, Side::LeftRight, &pane()).unwrap();
        assert!(menu.has_slot(27));
        assert!(menu.has_slot(35));
        assert!(!menu.has_slot(1));

        fill_area(&mut menu, 1, 2, 2, 3, &Slot::new(0, "gold")).unwrap();
        assert_eq!(menu.get_slot(11).unwrap().payload().id(), "gold");
        assert_eq!(menu.get_slot(22).unwrap().payload().id(), "gold");
        assert!(menu.get_slot(23).map(|s| s.payload().id() != "gold").unwrap_or(true));

        assert!(fill_area(&mut menu, 3, 8, 1, 2, &pane()).is_err());
        assert!(fill_row(&mut menu, 4, &pane()).is_err());
        assert!(fill_column(&mut menu, 9, &pane()).is_err());
    }
}
