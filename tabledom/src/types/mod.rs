mod color;
mod edges;
mod style;

pub use color::{Color, Rgb};
pub use edges::Edges;
pub use style::{Position, Style, TextStyle};
