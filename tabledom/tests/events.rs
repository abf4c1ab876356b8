use tabledom::{
    hit_test_any, Delivery, Document, Element, ListenerScope, MouseButton, MouseEvent,
    MouseEventKind, Position, Selector,
};

fn doc() -> Document {
    Document::new(
        Element::body().id("body").child(
            Element::table().id("grid").child(
                Element::tr()
                    .id("head")
                    .child(Element::th("#").id("h-row").class("no-drag").width(3))
                    .child(Element::th("Name").id("h-name").width(10))
                    .child(Element::th("Age").id("h-age").width(10)),
            ),
        ),
    )
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_deepest_element() {
    let doc = doc();
    assert_eq!(
        hit_test_any(doc.layout(), doc.root(), 5, 0),
        Some("h-name".to_string())
    );
    assert_eq!(hit_test_any(doc.layout(), doc.root(), 50, 0), None);
}

#[test]
fn test_hit_test_overlay_on_top() {
    let mut doc = doc();
    let body = Selector::parse("body").unwrap();
    doc.append_to(
        &body,
        Element::div()
            .id("overlay")
            .position(Position::Absolute)
            .left(4)
            .top(0)
            .width(2)
            .height(1),
    );

    assert_eq!(
        hit_test_any(doc.layout(), doc.root(), 5, 0),
        Some("overlay".to_string())
    );
    assert_eq!(
        hit_test_any(doc.layout(), doc.root(), 7, 0),
        Some("h-name".to_string())
    );
}

// ============================================================================
// Listeners
// ============================================================================

#[test]
fn test_bind_unbind() {
    let mut doc = doc();
    let id = doc
        .listeners_mut()
        .bind(ListenerScope::Document, MouseEventKind::Move);

    assert!(doc.listeners().is_bound(id));
    assert_eq!(doc.listeners().len(), 1);

    assert!(doc.listeners_mut().unbind(id));
    assert!(!doc.listeners_mut().unbind(id));
    assert!(doc.listeners().is_empty());
}

#[test]
fn test_dispatch_document_listener_by_kind() {
    let mut doc = doc();
    let moves = doc
        .listeners_mut()
        .bind(ListenerScope::Document, MouseEventKind::Move);
    let ups = doc
        .listeners_mut()
        .bind(ListenerScope::Document, MouseEventKind::Up);

    assert_eq!(
        doc.dispatch(&MouseEvent::moved(100, 100)),
        vec![Delivery {
            listener: moves,
            target: None
        }]
    );
    assert_eq!(
        doc.dispatch(&MouseEvent::up(0, 0)),
        vec![Delivery {
            listener: ups,
            target: None
        }]
    );
}

#[test]
fn test_dispatch_delegate_targets_matching_header() {
    let mut doc = doc();
    let headers = Selector::parse("th:not(.no-drag)").unwrap();
    let down = doc.listeners_mut().bind(
        ListenerScope::delegate("grid", headers),
        MouseEventKind::Down,
    );

    assert_eq!(
        doc.dispatch(&MouseEvent::down(15, 0)),
        vec![Delivery {
            listener: down,
            target: Some("h-age".to_string())
        }]
    );

    // Excluded header and empty space deliver nothing
    assert!(doc.dispatch(&MouseEvent::down(1, 0)).is_empty());
    assert!(doc.dispatch(&MouseEvent::down(40, 0)).is_empty());
    // Wrong kind
    assert!(doc.dispatch(&MouseEvent::up(15, 0)).is_empty());
}

#[test]
fn test_dispatch_delegate_outside_scope() {
    let mut doc = doc();
    let cells = Selector::parse("tr").unwrap();
    doc.listeners_mut()
        .bind(ListenerScope::delegate("head", cells), MouseEventKind::Down);

    // The scope element itself never matches
    assert!(doc.dispatch(&MouseEvent::down(5, 0)).is_empty());
}

// ============================================================================
// Crossterm conversion
// ============================================================================

fn ct(kind: crossterm::event::MouseEventKind, column: u16, row: u16) -> crossterm::event::MouseEvent {
    crossterm::event::MouseEvent {
        kind,
        column,
        row,
        modifiers: crossterm::event::KeyModifiers::NONE,
    }
}

#[test]
fn test_from_crossterm() {
    use crossterm::event::{MouseButton as CtBtn, MouseEventKind as CtKind};

    assert_eq!(
        MouseEvent::from_crossterm(&ct(CtKind::Down(CtBtn::Left), 3, 4)),
        Some(MouseEvent::down(3, 4))
    );
    assert_eq!(
        MouseEvent::from_crossterm(&ct(CtKind::Drag(CtBtn::Left), 7, 4)),
        Some(MouseEvent::moved(7, 4).with_button(MouseButton::Left))
    );
    assert_eq!(
        MouseEvent::from_crossterm(&ct(CtKind::Moved, 7, 4)),
        Some(MouseEvent::moved(7, 4))
    );
    assert_eq!(
        MouseEvent::from_crossterm(&ct(CtKind::Up(CtBtn::Right), 1, 1)),
        Some(MouseEvent::up(1, 1).with_button(MouseButton::Right))
    );
    assert_eq!(MouseEvent::from_crossterm(&ct(CtKind::ScrollDown, 0, 0)), None);
}
