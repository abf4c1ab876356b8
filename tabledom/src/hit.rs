use std::cmp::Reverse;

use crate::element::Element;
use crate::layout::LayoutResult;
use crate::types::Position;

/// Path from `root` down to the deepest element containing the point.
/// Empty if the root itself doesn't contain it.
///
/// Later children are on top, and absolutely positioned children are on
/// top of flow children, mirroring paint order.
pub fn hit_path<'a>(layout: &LayoutResult, root: &'a Element, x: i32, y: i32) -> Vec<&'a Element> {
    let mut path = Vec::new();
    if !collect_path(layout, root, x, y, &mut path) {
        path.clear();
    }
    path
}

/// Find the deepest element at the given coordinates.
pub fn hit_test_any(layout: &LayoutResult, root: &Element, x: i32, y: i32) -> Option<String> {
    hit_path(layout, root, x, y).last().map(|e| e.id.clone())
}

fn collect_path<'a>(
    layout: &LayoutResult,
    element: &'a Element,
    x: i32,
    y: i32,
    path: &mut Vec<&'a Element>,
) -> bool {
    let Some(rect) = layout.get(&element.id) else {
        return false;
    };

    // Overlays can sit outside their parent's box, so check them first.
    let mut overlays: Vec<&Element> = element
        .children
        .iter()
        .rev()
        .filter(|c| c.position == Position::Absolute)
        .collect();
    overlays.sort_by_key(|c| Reverse(c.z_index));
    let flow = element
        .children
        .iter()
        .rev()
        .filter(|c| c.position != Position::Absolute);

    path.push(element);
    for child in overlays {
        if collect_path(layout, child, x, y, path) {
            return true;
        }
    }

    if !rect.contains(x, y) {
        path.pop();
        return false;
    }

    for child in flow {
        if collect_path(layout, child, x, y, path) {
            return true;
        }
    }

    true
}
