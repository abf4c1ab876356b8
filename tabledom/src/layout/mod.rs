mod rect;

use std::collections::HashMap;

pub use rect::Rect;

use crate::element::{Element, Tag};
use crate::text::display_width;
use crate::types::Position;

pub type LayoutResult = HashMap<String, Rect>;

/// Lay out the whole tree, starting at the page origin.
pub fn layout(root: &Element) -> LayoutResult {
    let mut result = LayoutResult::new();
    place(root, 0, 0, &mut result);
    result
}

/// Place `element` at (x, y) unless it is absolutely positioned, and
/// return the size it occupies in its parent's flow.
fn place(element: &Element, x: i32, y: i32, result: &mut LayoutResult) -> (u16, u16) {
    let (x, y) = match element.position {
        Position::Absolute => (element.left.unwrap_or(0), element.top.unwrap_or(0)),
        Position::Static => (x, y),
    };

    let (width, height) = match element.tag {
        Tag::Table => place_table(element, x, y, result),
        Tag::Tr => place_rows(&[element], x, y, result),
        Tag::Th | Tag::Td => natural_cell_size(element),
        Tag::Body | Tag::Div => place_block(element, x, y, result),
    };

    let width = element.width.unwrap_or(width);
    let height = element.height.unwrap_or(height);
    result.insert(element.id.clone(), Rect::new(x, y, width, height));

    (width, height)
}

/// Size of a cell from its text and padding, unless set explicitly.
fn natural_cell_size(cell: &Element) -> (u16, u16) {
    let text_width = cell.text.as_deref().map(display_width).unwrap_or(0) as u16;
    let width = cell
        .width
        .unwrap_or_else(|| text_width.saturating_add(cell.padding.horizontal()));
    let height = cell
        .height
        .unwrap_or_else(|| 1u16.saturating_add(cell.padding.vertical()));
    (width, height)
}

fn place_table(table: &Element, x: i32, y: i32, result: &mut LayoutResult) -> (u16, u16) {
    let rows: Vec<&Element> = table
        .children
        .iter()
        .filter(|c| c.tag == Tag::Tr && c.position == Position::Static)
        .collect();

    let size = place_rows(&rows, x, y, result);

    for child in table.children.iter().filter(|c| c.position == Position::Absolute) {
        place(child, x, y, result);
    }

    size
}

/// Rows stack vertically. Every cell in a column gets the width of the
/// widest cell in that column, every cell in a row the height of the
/// tallest cell in that row.
fn place_rows(rows: &[&Element], x: i32, y: i32, result: &mut LayoutResult) -> (u16, u16) {
    let mut column_widths: Vec<u16> = Vec::new();
    let mut row_heights: Vec<u16> = Vec::with_capacity(rows.len());

    for row in rows {
        let mut row_height = 0u16;
        for (index, cell) in cells(row).enumerate() {
            let (width, height) = natural_cell_size(cell);
            if index == column_widths.len() {
                column_widths.push(width);
            } else {
                column_widths[index] = column_widths[index].max(width);
            }
            row_height = row_height.max(height);
        }
        row_heights.push(row.height.unwrap_or(row_height));
    }

    let total_width = column_widths
        .iter()
        .fold(0u16, |acc, w| acc.saturating_add(*w));

    let mut cursor_y = y;
    for (row, &row_height) in rows.iter().zip(&row_heights) {
        result.insert(row.id.clone(), Rect::new(x, cursor_y, total_width, row_height));

        let mut cursor_x = x;
        for (cell, &width) in cells(row).zip(&column_widths) {
            result.insert(cell.id.clone(), Rect::new(cursor_x, cursor_y, width, row_height));
            cursor_x += i32::from(width);
        }

        cursor_y += i32::from(row_height);
    }

    let total_height = row_heights
        .iter()
        .fold(0u16, |acc, h| acc.saturating_add(*h));
    (total_width, total_height)
}

fn cells<'a>(row: &'a Element) -> impl Iterator<Item = &'a Element> {
    row.children
        .iter()
        .filter(|c| c.tag.is_cell() && c.position == Position::Static)
}

/// Block flow: an optional line of text, then static children stacked
/// top to bottom inside the padding.
fn place_block(block: &Element, x: i32, y: i32, result: &mut LayoutResult) -> (u16, u16) {
    let padding = block.padding;
    let inner_x = x + i32::from(padding.left);
    let mut cursor_y = y + i32::from(padding.top);
    let mut content_width = 0u16;

    if let Some(text) = &block.text {
        content_width = display_width(text) as u16;
        cursor_y += 1;
    }

    for child in &block.children {
        if child.position == Position::Absolute {
            place(child, 0, 0, result);
            continue;
        }
        let (width, height) = place(child, inner_x, cursor_y, result);
        content_width = content_width.max(width);
        cursor_y += i32::from(height);
    }

    let width = content_width.saturating_add(padding.horizontal());
    let height = (cursor_y - y).max(0) as u16 + padding.bottom;
    (width, height)
}
