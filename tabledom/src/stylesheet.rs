use crate::element::Element;
use crate::selector::{Selector, SelectorError};
use crate::types::Style;

/// Class- and tag-keyed styles, applied in insertion order. An element's
/// inline style is layered last.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: Vec<(Selector, Style)>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, selector: &str, style: Style) -> Result<Self, SelectorError> {
        self.add(selector, style)?;
        Ok(self)
    }

    pub fn add(&mut self, selector: &str, style: Style) -> Result<(), SelectorError> {
        self.rules.push((Selector::parse(selector)?, style));
        Ok(())
    }

    pub fn resolve(&self, element: &Element) -> Style {
        self.rules
            .iter()
            .filter(|(selector, _)| selector.matches(element))
            .fold(Style::default(), |acc, (_, style)| acc.merged(style))
            .merged(&element.style)
    }
}
