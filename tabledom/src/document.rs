use crate::element::{detach_element, find_element, find_element_mut, walk, Element};
use crate::event::MouseEvent;
use crate::hit::hit_path;
use crate::layout::{layout, LayoutResult, Rect};
use crate::listener::{Delivery, ListenerScope, Listeners};
use crate::selector::Selector;

/// An element tree with its current layout and registered listeners.
///
/// Every structural mutation goes through the document so the layout is
/// recomputed before anyone asks for an offset.
#[derive(Debug)]
pub struct Document {
    root: Element,
    layout: LayoutResult,
    listeners: Listeners,
}

impl Document {
    pub fn new(root: Element) -> Self {
        let layout = layout(&root);
        Self {
            root,
            layout,
            listeners: Listeners::new(),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Page rectangle of the element from the latest layout.
    pub fn offset(&self, id: &str) -> Option<Rect> {
        self.layout.get(id).copied()
    }

    /// Mutate an element in place. Returns false if no element has the id.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut Element)) -> bool {
        let Some(element) = find_element_mut(&mut self.root, id) else {
            return false;
        };
        f(element);
        self.relayout();
        true
    }

    /// Append `element` as the last child of the first element matching
    /// `target`. Returns the appended element's id, or `None` (dropping
    /// the element) when nothing matches.
    pub fn append_to(&mut self, target: &Selector, element: Element) -> Option<String> {
        let target_id = self.query(target)?.id.clone();
        let appended_id = element.id.clone();
        let parent = find_element_mut(&mut self.root, &target_id)?;
        parent.children.push(element);
        log::trace!("[document] appended {} to {}", appended_id, target_id);
        self.relayout();
        Some(appended_id)
    }

    /// Remove an element and its subtree. Detaching an element that is not
    /// in the document is a no-op.
    pub fn detach(&mut self, id: &str) -> Option<Element> {
        let detached = detach_element(&mut self.root, id)?;
        log::trace!("[document] detached {}", id);
        self.relayout();
        Some(detached)
    }

    /// First element in document order matching the selector, root included.
    pub fn query(&self, selector: &Selector) -> Option<&Element> {
        let mut found = None;
        walk(&self.root, &mut |element| {
            if found.is_none() && selector.matches(element) {
                found = Some(element);
            }
        });
        found
    }

    /// Descendants of `scope` matching the selector, in document order.
    /// The scope element itself is never included.
    pub fn select_all(&self, scope: &str, selector: &Selector) -> Vec<&Element> {
        let Some(scope) = self.find(scope) else {
            return Vec::new();
        };
        let mut matches = Vec::new();
        for child in &scope.children {
            walk(child, &mut |element| {
                if selector.matches(element) {
                    matches.push(element);
                }
            });
        }
        matches
    }

    /// Number of elements in the document carrying `class`.
    pub fn count_class(&self, class: &str) -> usize {
        let mut count = 0;
        walk(&self.root, &mut |element| {
            if element.has_class(class) {
                count += 1;
            }
        });
        count
    }

    /// Work out which listeners an event reaches, in registration order.
    pub fn dispatch(&self, event: &MouseEvent) -> Vec<Delivery> {
        let mut path: Option<Vec<&Element>> = None;
        let mut deliveries = Vec::new();

        for listener in self.listeners.iter().filter(|l| l.kind == event.kind) {
            match &listener.scope {
                ListenerScope::Document => deliveries.push(Delivery {
                    listener: listener.id,
                    target: None,
                }),
                ListenerScope::Delegate { scope, selector } => {
                    let path = path
                        .get_or_insert_with(|| hit_path(&self.layout, &self.root, event.x, event.y));
                    let Some(scope_depth) = path.iter().position(|e| e.id == *scope) else {
                        continue;
                    };
                    let target = path[scope_depth + 1..]
                        .iter()
                        .rev()
                        .find(|e| selector.matches(e));
                    if let Some(target) = target {
                        deliveries.push(Delivery {
                            listener: listener.id,
                            target: Some(target.id.clone()),
                        });
                    }
                }
            }
        }

        deliveries
    }

    pub fn relayout(&mut self) {
        self.layout = layout(&self.root);
    }
}
