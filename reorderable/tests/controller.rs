use std::cell::RefCell;
use std::rc::Rc;

use reorderable::{ColumnReorderController, ReorderError, ReorderOptions};
use tabledom::render::render_to_buffer;
use tabledom::{Buffer, Document, Element, MouseButton, MouseEvent, Rect, Stylesheet};

const GHOST: &str = "dragged-header-table";
const PLACEHOLDER: &str = "dragged-header-new-column-spot-placeholder";

type Reported = Rc<RefCell<Vec<Vec<Option<String>>>>>;

/// Three 10-cell columns starting at x = 0: left edges 0, 10, 20.
fn doc() -> Document {
    Document::new(
        Element::body().id("body").child(
            Element::table()
                .id("grid")
                .class("grid")
                .child(
                    Element::tr()
                        .id("head")
                        .child(Element::th("One").id("h1").attr("data-header", "id1").width(10))
                        .child(Element::th("Two").id("h2").attr("data-header", "id2").width(10))
                        .child(Element::th("Three").id("h3").attr("data-header", "id3").width(10)),
                )
                .child(
                    Element::tr()
                        .id("row-0")
                        .child(Element::td("a"))
                        .child(Element::td("b"))
                        .child(Element::td("c")),
                ),
        ),
    )
}

fn attach(doc: &mut Document) -> (ColumnReorderController, Reported) {
    let reported: Reported = Rc::default();
    let sink = Rc::clone(&reported);
    let options = ReorderOptions::default().on_stop(move |order| sink.borrow_mut().push(order.to_vec()));
    let controller = ColumnReorderController::new(doc, "grid", options).unwrap();
    (controller, reported)
}

/// Dispatch through the document the way a host event loop does.
fn send(doc: &mut Document, controller: &mut ColumnReorderController, event: MouseEvent) -> bool {
    let deliveries = doc.dispatch(&event);
    let mut consumed = false;
    for delivery in &deliveries {
        consumed |= controller.handle(doc, delivery, &event);
    }
    consumed
}

fn ids(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(v.to_string())).collect()
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_drag_first_column_to_last_slot() {
    let mut doc = doc();
    let (mut controller, reported) = attach(&mut doc);

    assert!(send(&mut doc, &mut controller, MouseEvent::down(5, 0)));
    assert!(controller.is_dragging());
    assert_eq!(controller.cache().offsets(), &[0, 10, 20]);

    send(&mut doc, &mut controller, MouseEvent::moved(27, 0));
    assert_eq!(controller.drag().map(|d| d.hovered_index), Some(2));

    assert!(send(&mut doc, &mut controller, MouseEvent::up(27, 0)));
    assert_eq!(*reported.borrow(), vec![ids(&["id2", "id3", "id1"])]);

    assert!(!controller.is_dragging());
    assert_eq!(doc.count_class(GHOST), 0);
    assert_eq!(doc.count_class(PLACEHOLDER), 0);
    // Only the header mouse-down listener is left
    assert_eq!(doc.listeners().len(), 1);
}

#[test]
fn test_ghost_copies_header_and_table_classes() {
    let mut doc = doc();
    let (mut controller, _) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(5, 0));

    let ghost_id = controller.ghost_id().unwrap().to_string();
    let ghost = doc.find(&ghost_id).unwrap();
    assert_eq!(ghost.classes, vec!["grid".to_string(), GHOST.to_string()]);

    let cell = &ghost.children[0].children[0];
    assert_eq!(cell.text.as_deref(), Some("One"));
    assert_eq!(cell.get_attr("data-header"), Some("id1"));
    assert_ne!(cell.id, "h1");

    // Origin 0, no movement yet, one cell left for the border. One cell
    // narrower than the header; a one-line header keeps its line.
    assert_eq!(doc.offset(&ghost_id), Some(Rect::new(-1, 0, 9, 1)));
}

#[test]
fn test_ghost_is_painted_over_the_table() {
    let mut doc = doc();
    let (mut controller, _) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(12, 0));
    send(&mut doc, &mut controller, MouseEvent::moved(16, 0));

    let mut buf = Buffer::new(30, 1);
    render_to_buffer(doc.root(), doc.layout(), &Stylesheet::new(), &mut buf);
    // Ghost of "Two" at x = 13, over the flow row
    assert_eq!(buf.line(0), "One       TwoTwo    Three     ");
}

#[test]
fn test_ghost_follows_cursor_horizontally_only() {
    let mut doc = doc();
    let (mut controller, _) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(12, 0));
    send(&mut doc, &mut controller, MouseEvent::moved(16, 5));

    let ghost_id = controller.ghost_id().unwrap().to_string();
    // 10 + (16 - 12) - 1
    assert_eq!(doc.offset(&ghost_id).map(|r| (r.x, r.y)), Some((13, 0)));
}

#[test]
fn test_placeholder_covers_hovered_column() {
    let mut doc = doc();
    let (mut controller, _) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(5, 0));
    assert_eq!(doc.count_class(PLACEHOLDER), 0);

    send(&mut doc, &mut controller, MouseEvent::moved(27, 0));
    let placeholder = controller.placeholder_id().unwrap().to_string();
    assert_eq!(doc.offset(&placeholder), Some(Rect::new(20, 0, 10, 2)));

    send(&mut doc, &mut controller, MouseEvent::moved(17, 0));
    assert_eq!(controller.placeholder_id(), Some(placeholder.as_str()));
    assert_eq!(doc.offset(&placeholder), Some(Rect::new(10, 0, 10, 2)));
    assert_eq!(doc.count_class(PLACEHOLDER), 1);
}

#[test]
fn test_drag_back_to_origin_keeps_order() {
    let mut doc = doc();
    let (mut controller, reported) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(5, 0));
    send(&mut doc, &mut controller, MouseEvent::moved(30, 0));
    send(&mut doc, &mut controller, MouseEvent::moved(6, 0));
    send(&mut doc, &mut controller, MouseEvent::up(6, 0));

    assert_eq!(*reported.borrow(), vec![ids(&["id1", "id2", "id3"])]);
}

#[test]
fn test_click_without_move_keeps_order() {
    let mut doc = doc();
    let (mut controller, reported) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(15, 0));
    send(&mut doc, &mut controller, MouseEvent::up(15, 0));

    assert_eq!(*reported.borrow(), vec![ids(&["id1", "id2", "id3"])]);
}

#[test]
fn test_drag_left_of_all_columns_lands_first() {
    let mut doc = doc();
    let (mut controller, reported) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(25, 0));
    send(&mut doc, &mut controller, MouseEvent::moved(0, 0));

    // Ghost center is at -1.5, left of every column
    assert_eq!(controller.column_index_under_cursor(&doc), Some(-1));
    let placeholder = controller.placeholder_id().unwrap().to_string();
    assert_eq!(doc.offset(&placeholder), Some(Rect::new(0, 0, 10, 2)));
    assert_eq!(controller.compute_order(&doc), ids(&["id3", "id1", "id2"]));

    send(&mut doc, &mut controller, MouseEvent::up(0, 0));
    assert_eq!(*reported.borrow(), vec![ids(&["id3", "id1", "id2"])]);
}

#[test]
fn test_drag_past_last_column_lands_last() {
    let mut doc = doc();
    let (mut controller, reported) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(15, 0));
    send(&mut doc, &mut controller, MouseEvent::moved(80, 0));
    send(&mut doc, &mut controller, MouseEvent::up(80, 0));

    assert_eq!(*reported.borrow(), vec![ids(&["id1", "id3", "id2"])]);
}

// ============================================================================
// Cleanup
// ============================================================================

#[test]
fn test_repeated_mouse_down_leaves_one_ghost_and_placeholder() {
    let mut doc = doc();
    let (mut controller, reported) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(5, 0));
    send(&mut doc, &mut controller, MouseEvent::moved(15, 0));
    assert_eq!(doc.count_class(PLACEHOLDER), 1);

    // The first ghost covers the headers, so go straight to the controller
    assert!(controller.on_mouse_down(&mut doc, "h2", &MouseEvent::down(15, 0)));
    assert_eq!(doc.count_class(GHOST), 1);
    assert_eq!(doc.count_class(PLACEHOLDER), 0);

    send(&mut doc, &mut controller, MouseEvent::moved(20, 0));
    assert_eq!(doc.count_class(GHOST), 1);
    assert_eq!(doc.count_class(PLACEHOLDER), 1);

    // Header listener plus one move and one up listener
    assert_eq!(doc.listeners().len(), 3);
    assert!(reported.borrow().is_empty());
}

#[test]
fn test_destroy_during_drag() {
    let mut doc = doc();
    let (mut controller, reported) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(5, 0));
    send(&mut doc, &mut controller, MouseEvent::moved(15, 0));

    controller.destroy(&mut doc);

    assert!(!controller.is_dragging());
    assert_eq!(doc.count_class(GHOST), 0);
    assert_eq!(doc.count_class(PLACEHOLDER), 0);
    assert!(doc.listeners().is_empty());
    assert!(reported.borrow().is_empty());

    // Nothing listens any more
    assert!(doc.dispatch(&MouseEvent::down(5, 0)).is_empty());

    controller.destroy(&mut doc);
    assert!(doc.listeners().is_empty());
}

#[test]
fn test_events_after_mouse_up_are_ignored() {
    let mut doc = doc();
    let (mut controller, reported) = attach(&mut doc);

    send(&mut doc, &mut controller, MouseEvent::down(5, 0));
    send(&mut doc, &mut controller, MouseEvent::up(5, 0));

    assert!(!send(&mut doc, &mut controller, MouseEvent::moved(20, 0)));
    assert!(!send(&mut doc, &mut controller, MouseEvent::up(20, 0)));
    assert!(controller.on_mouse_up(&mut doc, &MouseEvent::up(20, 0)).is_none());
    assert_eq!(reported.borrow().len(), 1);
}

// ============================================================================
// Guards and configuration
// ============================================================================

#[test]
fn test_right_button_does_not_start_drag() {
    let mut doc = doc();
    let (mut controller, _) = attach(&mut doc);

    let event = MouseEvent::down(5, 0).with_button(MouseButton::Right);
    assert!(!send(&mut doc, &mut controller, event));
    assert!(!controller.is_dragging());
    assert_eq!(doc.count_class(GHOST), 0);
}

#[test]
fn test_no_drag_header_is_not_draggable() {
    let mut doc = Document::new(
        Element::body().child(
            Element::table().id("grid").child(
                Element::tr()
                    .child(Element::th("#").id("h0").class("no-drag").width(4))
                    .child(Element::th("One").id("h1").attr("data-header", "id1").width(10))
                    .child(Element::th("Two").id("h2").attr("data-header", "id2").width(10)),
            ),
        ),
    );
    let (mut controller, reported) = attach(&mut doc);

    assert!(!send(&mut doc, &mut controller, MouseEvent::down(1, 0)));
    assert!(!controller.on_mouse_down(&mut doc, "h0", &MouseEvent::down(1, 0)));

    send(&mut doc, &mut controller, MouseEvent::down(6, 0));
    assert_eq!(controller.cache().offsets(), &[4, 14]);
    send(&mut doc, &mut controller, MouseEvent::moved(20, 0));
    send(&mut doc, &mut controller, MouseEvent::up(20, 0));

    assert_eq!(*reported.borrow(), vec![ids(&["id2", "id1"])]);
}

#[test]
fn test_missing_identifier_reports_none() {
    let mut doc = Document::new(
        Element::body().child(
            Element::table().id("grid").child(
                Element::tr()
                    .child(Element::th("One").id("h1").attr("data-header", "id1").width(10))
                    .child(Element::th("Two").id("h2").width(10)),
            ),
        ),
    );
    let (controller, _) = attach(&mut doc);

    assert_eq!(
        controller.compute_order(&doc),
        vec![Some("id1".to_string()), None]
    );
    assert_eq!(controller.column_index_under_cursor(&doc), None);
}

#[test]
fn test_missing_append_target_does_not_start_drag() {
    let mut doc = doc();
    let options = ReorderOptions::default().append_target_selector("#overlays");
    let mut controller = ColumnReorderController::new(&mut doc, "grid", options).unwrap();

    assert!(!send(&mut doc, &mut controller, MouseEvent::down(5, 0)));
    assert!(!controller.is_dragging());
    assert_eq!(doc.listeners().len(), 1);
}

#[test]
fn test_custom_append_target() {
    let mut doc = Document::new(
        Element::body()
            .child(
                Element::table().id("grid").child(
                    Element::tr()
                        .child(Element::th("One").id("h1").attr("data-header", "id1").width(10))
                        .child(Element::th("Two").id("h2").attr("data-header", "id2").width(10)),
                ),
            )
            .child(Element::div().id("overlays")),
    );
    let options = ReorderOptions::default().append_target_selector("#overlays");
    let mut controller = ColumnReorderController::new(&mut doc, "grid", options).unwrap();

    send(&mut doc, &mut controller, MouseEvent::down(5, 0));
    send(&mut doc, &mut controller, MouseEvent::moved(9, 0));

    let overlays = doc.find("overlays").unwrap();
    assert_eq!(overlays.children.len(), 2);
}

#[test]
fn test_new_rejects_unknown_table() {
    let mut doc = doc();
    let err = ColumnReorderController::new(&mut doc, "nope", ReorderOptions::default()).unwrap_err();
    assert!(matches!(err, ReorderError::TableNotFound(id) if id == "nope"));
    assert!(doc.listeners().is_empty());
}

#[test]
fn test_new_rejects_bad_selector() {
    let mut doc = doc();
    let options = ReorderOptions::default().header_selector("th:not(.no-drag");
    let err = ColumnReorderController::new(&mut doc, "grid", options).unwrap_err();
    assert!(matches!(
        err,
        ReorderError::InvalidSelector {
            option: "header selector",
            ..
        }
    ));
    assert!(doc.listeners().is_empty());
}
