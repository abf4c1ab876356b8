use crate::types::{Rgb, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Second half of a wide symbol in the cell to the left.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            style: TextStyle::default(),
            wide_continuation: false,
        }
    }
}
