//! Compound selectors: `tag`, `#id`, `.class`, `[attr]` and `:not(...)`.
//!
//! Combinators (descendant, child, sibling) and selector lists are not
//! supported. Every part of a compound selector must match the same element.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;
use std::str::FromStr;

use thiserror::Error;

use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,
    #[error("unexpected character {ch:?} at position {position} in selector {source_text:?}")]
    UnexpectedChar {
        ch: char,
        position: usize,
        source_text: String,
    },
    #[error("expected a name after {after:?} at position {position}")]
    MissingName { after: char, position: usize },
    #[error("unterminated {what} in selector {source_text:?}")]
    Unterminated {
        what: &'static str,
        source_text: String,
    },
    #[error("unsupported pseudo-class :{0}")]
    UnsupportedPseudo(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    source: String,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<String>,
    negations: Vec<Selector>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let source = input.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut parser = Parser {
            source,
            chars: source.char_indices().peekable(),
        };
        let selector = parser.compound()?;
        match parser.chars.next() {
            None => Ok(selector),
            Some((position, ch)) => Err(parser.unexpected(ch, position)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && tag != element.tag.as_str() {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if *id != element.id {
                return false;
            }
        }
        self.classes.iter().all(|class| element.has_class(class))
            && self
                .attributes
                .iter()
                .all(|name| element.attributes.contains_key(name))
            && !self.negations.iter().any(|negated| negated.matches(element))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

impl<'a> Parser<'a> {
    fn compound(&mut self) -> Result<Selector, SelectorError> {
        let start = self.chars.peek().map(|(i, _)| *i).unwrap_or(self.source.len());
        let mut selector = Selector::default();

        match self.chars.peek().copied() {
            Some((_, '*')) => {
                self.chars.next();
                selector.tag = Some("*".to_string());
            }
            Some((_, ch)) if is_name_char(ch) => {
                selector.tag = Some(self.name().to_ascii_lowercase());
            }
            _ => {}
        }

        while let Some(&(position, ch)) = self.chars.peek() {
            match ch {
                '.' => {
                    self.chars.next();
                    selector.classes.push(self.required_name('.', position)?);
                }
                '#' => {
                    self.chars.next();
                    selector.id = Some(self.required_name('#', position)?);
                }
                '[' => {
                    self.chars.next();
                    let name = self.required_name('[', position)?;
                    match self.chars.next() {
                        Some((_, ']')) => selector.attributes.push(name),
                        Some((position, ch)) => return Err(self.unexpected(ch, position)),
                        None => return Err(self.unterminated("attribute selector")),
                    }
                }
                ':' => {
                    self.chars.next();
                    let pseudo = self.required_name(':', position)?;
                    if pseudo != "not" {
                        return Err(SelectorError::UnsupportedPseudo(pseudo));
                    }
                    match self.chars.next() {
                        Some((_, '(')) => {}
                        Some((position, ch)) => return Err(self.unexpected(ch, position)),
                        None => return Err(self.unterminated(":not(")),
                    }
                    let negated = self.compound()?;
                    if negated.is_empty() {
                        let next = self.chars.peek().copied();
                        return Err(match next {
                            Some((position, ch)) => self.unexpected(ch, position),
                            None => self.unterminated(":not("),
                        });
                    }
                    match self.chars.next() {
                        Some((_, ')')) => selector.negations.push(negated),
                        Some((position, ch)) => return Err(self.unexpected(ch, position)),
                        None => return Err(self.unterminated(":not(")),
                    }
                }
                ')' => break,
                _ => return Err(self.unexpected(ch, position)),
            }
        }

        let end = self.chars.peek().map(|(i, _)| *i).unwrap_or(self.source.len());
        selector.source = self.source[start..end].to_string();
        Ok(selector)
    }

    fn name(&mut self) -> String {
        let mut name = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if !is_name_char(ch) {
                break;
            }
            name.push(ch);
            self.chars.next();
        }
        name
    }

    fn required_name(&mut self, after: char, position: usize) -> Result<String, SelectorError> {
        let name = self.name();
        if name.is_empty() {
            return Err(SelectorError::MissingName { after, position });
        }
        Ok(name)
    }

    fn unexpected(&self, ch: char, position: usize) -> SelectorError {
        SelectorError::UnexpectedChar {
            ch,
            position,
            source_text: self.source.to_string(),
        }
    }

    fn unterminated(&self, what: &'static str) -> SelectorError {
        SelectorError::Unterminated {
            what,
            source_text: self.source.to_string(),
        }
    }
}

impl Selector {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.negations.is_empty()
    }
}
