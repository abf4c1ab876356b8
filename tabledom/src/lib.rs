pub mod buffer;
pub mod document;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod listener;
pub mod render;
pub mod selector;
pub mod stylesheet;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::{Buffer, Cell};
pub use document::Document;
pub use element::{Element, Tag};
pub use event::{MouseButton, MouseEvent, MouseEventKind};
pub use hit::{hit_path, hit_test_any};
pub use layout::{LayoutResult, Rect};
pub use listener::{Delivery, ListenerId, ListenerScope, Listeners};
pub use selector::{Selector, SelectorError};
pub use stylesheet::Stylesheet;
pub use terminal::Terminal;
pub use types::*;
