mod node;

pub use node::{Element, Tag};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    root.children
        .iter()
        .find_map(|child| find_element(child, id))
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    root.children
        .iter_mut()
        .find_map(|child| find_element_mut(child, id))
}

/// Remove the element with the given ID from below `root`.
/// The root itself can't be detached.
pub fn detach_element(root: &mut Element, id: &str) -> Option<Element> {
    if let Some(index) = root.children.iter().position(|c| c.id == id) {
        return Some(root.children.remove(index));
    }

    root.children
        .iter_mut()
        .find_map(|child| detach_element(child, id))
}

/// Visit `root` and all its descendants in document order.
pub fn walk<'a>(root: &'a Element, visit: &mut impl FnMut(&'a Element)) {
    visit(root);
    for child in &root.children {
        walk(child, visit);
    }
}
