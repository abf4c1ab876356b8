use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{Edges, Position, Style};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Element kinds understood by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Body,
    Div,
    Table,
    Tr,
    Th,
    Td,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Body => "body",
            Tag::Div => "div",
            Tag::Table => "table",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
        }
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, Tag::Th | Tag::Td)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,
    pub classes: Vec<String>,
    pub attributes: HashMap<String, String>,

    // Content
    pub text: Option<String>,
    pub children: Vec<Element>,

    // Box
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub padding: Edges,

    // Positioning
    pub position: Position,
    pub left: Option<i32>,
    pub top: Option<i32>,
    /// Paint order among absolutely positioned siblings.
    pub z_index: i16,

    // Inline style, layered over stylesheet rules
    pub style: Style,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            id: generate_id(tag.as_str()),
            tag,
            classes: Vec::new(),
            attributes: HashMap::new(),
            text: None,
            children: Vec::new(),
            width: None,
            height: None,
            padding: Edges::default(),
            position: Position::Static,
            left: None,
            top: None,
            z_index: 0,
            style: Style::default(),
        }
    }

    pub fn body() -> Self {
        Self::new(Tag::Body)
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn table() -> Self {
        Self::new(Tag::Table)
    }

    pub fn tr() -> Self {
        Self::new(Tag::Tr)
    }

    pub fn th(text: impl Into<String>) -> Self {
        Self::new(Tag::Th).text(text)
    }

    pub fn td(text: impl Into<String>) -> Self {
        Self::new(Tag::Td).text(text)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for class in classes {
            self.add_class(class);
        }
        self
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    // Box
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    // Positioning
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn left(mut self, left: i32) -> Self {
        self.left = Some(left);
        self
    }

    pub fn top(mut self, top: i32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn z_index(mut self, z_index: i16) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Deep copy with newly generated IDs for this element and every
    /// descendant, so the copy can live in the same document.
    pub fn clone_with_fresh_ids(&self) -> Element {
        let mut copy = self.clone();
        copy.refresh_ids();
        copy
    }

    fn refresh_ids(&mut self) {
        self.id = generate_id(self.tag.as_str());
        for child in &mut self.children {
            child.refresh_ids();
        }
    }
}
