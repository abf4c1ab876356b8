use tabledom::{
    Delivery, Document, Element, ListenerId, ListenerScope, MouseEvent, MouseEventKind, Position,
    Selector,
};

use crate::cache::ColumnPositionCache;
use crate::drag::DragState;
use crate::error::ReorderError;
use crate::options::ReorderOptions;
use crate::order::move_column;

/// Ghosts paint above the placeholder.
const GHOST_Z_INDEX: i16 = 1;

/// Drag-to-reorder behavior for the header cells of one table.
///
/// The controller owns at most one ghost and one placeholder at a time.
/// Mouse input reaches it through the document's listener registry: the
/// host dispatches each event and passes the deliveries to [`handle`].
///
/// [`handle`]: ColumnReorderController::handle
#[derive(Debug)]
pub struct ColumnReorderController {
    table_id: String,
    options: ReorderOptions,
    header_selector: Selector,
    append_target: Selector,
    cache: ColumnPositionCache,
    drag: Option<DragState>,
    placeholder_id: Option<String>,
    header_listener: Option<ListenerId>,
    move_listener: Option<ListenerId>,
    up_listener: Option<ListenerId>,
}

impl ColumnReorderController {
    /// Attach to the table with id `table_id` and start listening for
    /// mouse-down on its header cells.
    pub fn new(
        doc: &mut Document,
        table_id: impl Into<String>,
        options: ReorderOptions,
    ) -> Result<Self, ReorderError> {
        let table_id = table_id.into();
        if !doc.contains(&table_id) {
            return Err(ReorderError::TableNotFound(table_id));
        }

        let header_selector = Selector::parse(&options.header_selector).map_err(|source| {
            ReorderError::InvalidSelector {
                option: "header selector",
                source,
            }
        })?;
        let append_target = Selector::parse(&options.append_target_selector).map_err(|source| {
            ReorderError::InvalidSelector {
                option: "append target selector",
                source,
            }
        })?;

        let header_listener = doc.listeners_mut().bind(
            ListenerScope::delegate(table_id.clone(), header_selector.clone()),
            MouseEventKind::Down,
        );
        log::debug!(
            "[reorder] attached to {} (headers: {})",
            table_id,
            header_selector
        );

        Ok(Self {
            table_id,
            options,
            header_selector,
            append_target,
            cache: ColumnPositionCache::default(),
            drag: None,
            placeholder_id: None,
            header_listener: Some(header_listener),
            move_listener: None,
            up_listener: None,
        })
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn options(&self) -> &ReorderOptions {
        &self.options
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn cache(&self) -> &ColumnPositionCache {
        &self.cache
    }

    pub fn ghost_id(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.ghost_id.as_str())
    }

    pub fn placeholder_id(&self) -> Option<&str> {
        self.placeholder_id.as_deref()
    }

    /// Route a delivery from [`Document::dispatch`]. Deliveries for
    /// listeners this controller doesn't own are ignored. Returns true when
    /// the event was consumed and the host should suppress its default
    /// handling.
    pub fn handle(&mut self, doc: &mut Document, delivery: &Delivery, event: &MouseEvent) -> bool {
        let listener = Some(delivery.listener);

        if listener == self.header_listener && event.kind == MouseEventKind::Down {
            return match &delivery.target {
                Some(header_id) => self.on_mouse_down(doc, header_id, event),
                None => false,
            };
        }
        if listener == self.move_listener && event.kind == MouseEventKind::Move {
            self.on_mouse_move(doc, event);
            return true;
        }
        if listener == self.up_listener && event.kind == MouseEventKind::Up {
            return self.on_mouse_up(doc, event).is_some();
        }

        false
    }

    /// Start dragging `header_id`. Any drag still in progress is torn down
    /// first. Returns true if a drag started, meaning the host must not run
    /// the default mouse-down action (text selection).
    pub fn on_mouse_down(&mut self, doc: &mut Document, header_id: &str, event: &MouseEvent) -> bool {
        if !event.is_left_button() {
            return false;
        }

        self.destroy_dragged_element(doc);

        let header_ids = self.header_ids(doc);
        let Some(original_index) = header_ids.iter().position(|id| id == header_id) else {
            log::debug!("[reorder] {} is not a draggable header", header_id);
            return false;
        };
        let (Some(header), Some(header_rect)) = (doc.find(header_id), doc.offset(header_id)) else {
            return false;
        };

        self.cache = ColumnPositionCache::build(doc, header_ids.iter().map(String::as_str));

        // Never shrink below one cell, or the ghost would not be painted.
        let allowance = self.options.border_allowance;
        let mut cell = header.clone_with_fresh_ids();
        cell.width = Some(header_rect.width.saturating_sub(allowance).max(1));
        cell.height = Some(header_rect.height.saturating_sub(allowance).max(1));

        let table_classes = doc
            .find(&self.table_id)
            .map(|table| table.classes.clone())
            .unwrap_or_default();
        let mut ghost = Element::table()
            .classes(table_classes)
            .position(Position::Absolute)
            .z_index(GHOST_Z_INDEX)
            .child(Element::tr().child(cell));
        if let Some(class) = &self.options.dragged_element_class {
            ghost.add_class(class.clone());
        }

        let drag = DragState {
            original_index,
            hovered_index: original_index as isize,
            ghost_id: ghost.id.clone(),
            origin: (header_rect.x, header_rect.y),
            origin_cursor_x: event.x,
            current_cursor_x: event.x,
        };
        ghost.left = Some(drag.ghost_left());
        ghost.top = Some(drag.ghost_top());

        if doc.append_to(&self.append_target, ghost).is_none() {
            log::warn!(
                "[reorder] append target {} not found, drag not started",
                self.append_target
            );
            return false;
        }

        let listeners = doc.listeners_mut();
        self.up_listener = Some(listeners.bind(ListenerScope::Document, MouseEventKind::Up));
        self.move_listener = Some(listeners.bind(ListenerScope::Document, MouseEventKind::Move));

        log::debug!(
            "[reorder] drag start: column {} ({}) at x={}",
            original_index,
            header_id,
            event.x
        );
        self.drag = Some(drag);
        true
    }

    /// Follow the cursor: move the ghost, recompute the hovered slot and
    /// move the placeholder over it. Ignored when no drag is in progress.
    pub fn on_mouse_move(&mut self, doc: &mut Document, event: &MouseEvent) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        drag.current_cursor_x = event.x;
        let (left, top) = (drag.ghost_left(), drag.ghost_top());
        let ghost_id = drag.ghost_id.clone();
        doc.update(&ghost_id, |ghost| {
            ghost.left = Some(left);
            ghost.top = Some(top);
        });

        if let Some(hovered) = self.column_index_under_cursor(doc) {
            if let Some(drag) = self.drag.as_mut() {
                drag.hovered_index = hovered;
            }
            log::trace!("[reorder] cursor x={} ghost left={} slot={}", event.x, left, hovered);
        }

        self.highlight_place_of_insertion(doc);
    }

    /// Finish the drag: remove the visuals, stop listening to the document
    /// and report the new order to the `stop` callback. Returns the order,
    /// or `None` if no drag was in progress.
    pub fn on_mouse_up(&mut self, doc: &mut Document, event: &MouseEvent) -> Option<Vec<Option<String>>> {
        let drag = self.destroy_dragged_element(doc)?;
        let order = self.order_for(doc, &drag);

        log::debug!(
            "[reorder] drag end at x={}: column {} -> slot {}, order {:?}",
            event.x,
            drag.original_index,
            drag.hovered_index,
            order
        );

        if let Some(stop) = self.options.stop.as_mut() {
            stop(order.as_slice());
        }
        Some(order)
    }

    /// Slot under the ghost's horizontal center, or `None` without a drag.
    pub fn column_index_under_cursor(&self, doc: &Document) -> Option<isize> {
        let drag = self.drag.as_ref()?;
        let ghost = doc.offset(&drag.ghost_id)?;
        Some(self.cache.index_under(ghost.center_x()))
    }

    /// Column identifiers in their current order, with the dragged column
    /// moved to the hovered slot when a drag is in progress.
    pub fn compute_order(&self, doc: &Document) -> Vec<Option<String>> {
        match &self.drag {
            Some(drag) => self.order_for(doc, drag),
            None => self.identifiers(doc),
        }
    }

    /// Detach from the table: tear down any drag in progress without
    /// reporting it and stop listening for header mouse-down. Calling it
    /// again is a no-op.
    pub fn destroy(&mut self, doc: &mut Document) {
        self.destroy_dragged_element(doc);
        if let Some(listener) = self.header_listener.take() {
            doc.listeners_mut().unbind(listener);
            log::debug!("[reorder] detached from {}", self.table_id);
        }
    }

    fn header_ids(&self, doc: &Document) -> Vec<String> {
        doc.select_all(&self.table_id, &self.header_selector)
            .into_iter()
            .map(|header| header.id.clone())
            .collect()
    }

    fn identifiers(&self, doc: &Document) -> Vec<Option<String>> {
        doc.select_all(&self.table_id, &self.header_selector)
            .into_iter()
            .map(|header| header.get_attr(&self.options.data_header).map(str::to_string))
            .collect()
    }

    fn order_for(&self, doc: &Document, drag: &DragState) -> Vec<Option<String>> {
        let identifiers = self.identifiers(doc);
        if !drag.has_moved_slot() {
            return identifiers;
        }
        move_column(identifiers, drag.original_index, drag.hovered_index)
    }

    /// Cover the hovered slot with the placeholder, creating it on first
    /// use. Left of every column counts as the first slot.
    fn highlight_place_of_insertion(&mut self, doc: &mut Document) {
        let Some(drag) = &self.drag else {
            return;
        };
        let slot = drag.hovered_index.max(0).unsigned_abs();

        let header_ids = self.header_ids(doc);
        let (Some(left), Some(column), Some(table)) = (
            self.cache.offset(slot),
            header_ids.get(slot).and_then(|id| doc.offset(id)),
            doc.offset(&self.table_id),
        ) else {
            return;
        };

        let place = |spot: &mut Element| {
            spot.left = Some(left);
            spot.top = Some(table.y);
            spot.width = Some(column.width);
            spot.height = Some(table.height);
        };

        if let Some(id) = &self.placeholder_id {
            doc.update(id, place);
            return;
        }

        let mut spot = Element::div()
            .class(self.options.new_column_spot_placeholder_class.clone())
            .position(Position::Absolute);
        place(&mut spot);
        self.placeholder_id = doc.append_to(&self.append_target, spot);
    }

    fn dehighlight_place_of_insertion(&mut self, doc: &mut Document) {
        if let Some(id) = self.placeholder_id.take() {
            doc.detach(&id);
        }
    }

    /// Remove the ghost and placeholder and unbind the document listeners.
    /// Returns the drag that was in progress, if any.
    fn destroy_dragged_element(&mut self, doc: &mut Document) -> Option<DragState> {
        self.dehighlight_place_of_insertion(doc);

        let listeners = doc.listeners_mut();
        for listener in [self.move_listener.take(), self.up_listener.take()]
            .into_iter()
            .flatten()
        {
            listeners.unbind(listener);
        }

        let drag = self.drag.take()?;
        doc.detach(&drag.ghost_id);
        Some(drag)
    }
}
