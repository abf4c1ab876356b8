use super::Cell;
use crate::layout::Rect;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// A screen-sized grid of cells. Writes outside the grid are clipped, so
/// callers can paint elements that hang off any edge.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u16::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = u16::try_from(y).ok().filter(|y| *y < self.height)?;
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Paint the background of every visible cell in `rect`, keeping symbols.
    pub fn fill_background(&mut self, rect: Rect, bg: Rgb) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.bg = bg;
                }
            }
        }
    }

    /// Write `text` starting at (x, y), stopping before `max_x`. Cells keep
    /// their background. The cell after a wide symbol is blanked and marked
    /// as its continuation. Returns the x after the last written symbol.
    pub fn put_str(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        max_x: i32,
        fg: Rgb,
        style: TextStyle,
    ) -> i32 {
        let mut cursor = x;
        for ch in text.chars() {
            let width = char_width(ch).max(1) as i32;
            if cursor + width > max_x {
                break;
            }
            if let Some(cell) = self.get_mut(cursor, y) {
                cell.symbol = ch;
                cell.fg = fg;
                cell.style = style;
                cell.wide_continuation = false;
            }
            if width == 2 {
                if let Some(continuation) = self.get_mut(cursor + 1, y) {
                    continuation.symbol = ' ';
                    continuation.fg = fg;
                    continuation.style = style;
                    continuation.wide_continuation = true;
                }
            }
            cursor += width;
        }
        cursor
    }

    /// Row of symbols, for tests and debugging.
    pub fn line(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(i32::from(x), i32::from(y)))
            .map(|c| c.symbol)
            .collect()
    }

    /// Cells that differ from `other`, with their coordinates.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        let width = usize::from(self.width.max(1));
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| ((i % width) as u16, (i / width) as u16, cell))
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }
}
