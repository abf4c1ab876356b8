/// Transient state of one drag gesture, from mouse-down to mouse-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    /// Index of the dragged header among the draggable headers.
    pub original_index: usize,
    /// Slot under the ghost's center. `-1` is left of every column.
    pub hovered_index: isize,
    pub ghost_id: String,
    /// Page offset (left, top) of the dragged header at drag start.
    pub origin: (i32, i32),
    pub origin_cursor_x: i32,
    pub current_cursor_x: i32,
}

impl DragState {
    /// Left edge of the ghost: the header's origin shifted by how far the
    /// cursor travelled, one cell left to cover the header's border.
    pub fn ghost_left(&self) -> i32 {
        self.origin.0 + (self.current_cursor_x - self.origin_cursor_x) - 1
    }

    pub fn ghost_top(&self) -> i32 {
        self.origin.1
    }

    pub fn has_moved_slot(&self) -> bool {
        self.hovered_index != self.original_index as isize
    }
}
