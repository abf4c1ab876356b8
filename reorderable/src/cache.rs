use tabledom::Document;

/// Left edges of the header cells, captured when a drag starts.
///
/// Indices line up with the headers as they were at capture time. The
/// cache goes stale after any column resize or reorder and is rebuilt on
/// the next drag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPositionCache {
    offsets: Vec<i32>,
}

impl ColumnPositionCache {
    pub fn new(offsets: Vec<i32>) -> Self {
        Self { offsets }
    }

    /// Capture the left edge of each header. Headers without a layout
    /// count as sitting at 0 so indices stay aligned.
    pub fn build<'a>(doc: &Document, header_ids: impl IntoIterator<Item = &'a str>) -> Self {
        let offsets = header_ids
            .into_iter()
            .map(|id| doc.offset(id).map_or(0, |rect| rect.x))
            .collect();
        Self { offsets }
    }

    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    pub fn offset(&self, index: usize) -> Option<i32> {
        self.offsets.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Index of the last column whose left edge is at or before `x`.
    ///
    /// `-1` means `x` is left of every column. Past the last column's left
    /// edge, including past its right edge, the last index is returned, so
    /// dropping beyond the table lands at the end.
    pub fn index_under(&self, x: f64) -> isize {
        let mut index = -1;
        for &offset in &self.offsets {
            if f64::from(offset) > x {
                return index;
            }
            index += 1;
        }
        index
    }
}
