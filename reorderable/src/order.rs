use tabledom::{Document, Element, Selector, Tag};

/// Move the item at `from` to the slot `hovered`, shifting the items in
/// between (remove, then insert; not a swap).
///
/// A `hovered` of `-1` means "before the first column" and lands at 0.
/// When `hovered` equals `from` the order is returned untouched.
pub fn move_column<T>(mut items: Vec<T>, from: usize, hovered: isize) -> Vec<T> {
    if hovered == from as isize || from >= items.len() {
        return items;
    }
    let to = hovered.max(0).unsigned_abs().min(items.len() - 1);
    let item = items.remove(from);
    items.insert(to, item);
    items
}

/// Rearrange the columns of a table to follow `order`.
///
/// Headers matching `header_selector` are matched to `order` through their
/// `data_header` attribute. The header row and every other row of the
/// table get the same permutation, applied to the cell slots the
/// draggable headers occupy; columns excluded by the selector stay put.
/// Identifiers that are `None` or unknown are skipped, and headers missing
/// from `order` keep their relative order after the named ones.
///
/// Returns false if the table or its header row can't be found.
pub fn apply_column_order(
    doc: &mut Document,
    table_id: &str,
    header_selector: &Selector,
    data_header: &str,
    order: &[Option<String>],
) -> bool {
    let Some(table) = doc.find(table_id) else {
        return false;
    };
    let headers = doc.select_all(table_id, header_selector);
    let Some(header_row) = table
        .children
        .iter()
        .find(|row| row.tag == Tag::Tr && headers.iter().any(|h| is_cell_of(row, &h.id)))
    else {
        return false;
    };

    // Cell slots the draggable headers occupy in their row.
    let slots: Vec<usize> = header_row
        .children
        .iter()
        .enumerate()
        .filter(|(_, cell)| headers.iter().any(|h| h.id == cell.id))
        .map(|(slot, _)| slot)
        .collect();
    let identifiers: Vec<Option<&str>> = header_row
        .children
        .iter()
        .filter(|cell| headers.iter().any(|h| h.id == cell.id))
        .map(|cell| cell.get_attr(data_header))
        .collect();

    let permutation = permutation_for(&identifiers, order);
    if permutation.iter().enumerate().all(|(i, &source)| i == source) {
        return true;
    }

    let row_ids: Vec<String> = table
        .children
        .iter()
        .filter(|row| row.tag == Tag::Tr)
        .map(|row| row.id.clone())
        .collect();

    log::debug!(
        "[reorder] applying column permutation {:?} to {} rows of {}",
        permutation,
        row_ids.len(),
        table_id
    );

    for row_id in &row_ids {
        doc.update(row_id, |row| permute_slots(&mut row.children, &slots, &permutation));
    }
    true
}

fn is_cell_of(row: &Element, id: &str) -> bool {
    row.children.iter().any(|cell| cell.id == id)
}

/// For each target position, the current position of the column that
/// should end up there.
fn permutation_for(identifiers: &[Option<&str>], order: &[Option<String>]) -> Vec<usize> {
    let mut taken = vec![false; identifiers.len()];
    let mut permutation = Vec::with_capacity(identifiers.len());

    for wanted in order.iter().flatten() {
        let found = (0..identifiers.len())
            .find(|&i| !taken[i] && identifiers[i] == Some(wanted.as_str()));
        if let Some(index) = found {
            taken[index] = true;
            permutation.push(index);
        }
    }

    permutation.extend((0..identifiers.len()).filter(|i| !taken[*i]));
    permutation
}

/// Rows with fewer cells than the header row are left alone.
fn permute_slots(cells: &mut [Element], slots: &[usize], permutation: &[usize]) {
    if slots.iter().any(|&slot| slot >= cells.len()) {
        return;
    }
    let current: Vec<Element> = slots.iter().map(|&slot| cells[slot].clone()).collect();
    for (&slot, &source) in slots.iter().zip(permutation) {
        cells[slot] = current[source].clone();
    }
}
