use crate::buffer::Buffer;
use crate::element::Element;
use crate::layout::LayoutResult;
use crate::stylesheet::Stylesheet;
use crate::text::truncate_to_width;
use crate::types::{Position, Rgb};

/// Paint the tree into `buf`. Flow content is painted in document order,
/// then absolutely positioned elements on top, lowest `z_index` first.
pub fn render_to_buffer(root: &Element, layout: &LayoutResult, sheet: &Stylesheet, buf: &mut Buffer) {
    let mut overlays = Vec::new();
    paint(root, layout, sheet, buf, &mut overlays);

    while !overlays.is_empty() {
        let mut layer = std::mem::take(&mut overlays);
        layer.sort_by_key(|e| e.z_index);
        for element in layer {
            paint(element, layout, sheet, buf, &mut overlays);
        }
    }
}

fn paint<'a>(
    element: &'a Element,
    layout: &LayoutResult,
    sheet: &Stylesheet,
    buf: &mut Buffer,
    overlays: &mut Vec<&'a Element>,
) {
    let Some(rect) = layout.get(&element.id) else {
        return;
    };
    let style = sheet.resolve(element);

    if let Some(bg) = &style.background {
        buf.fill_background(*rect, bg.to_rgb());
    }

    if let Some(text) = &element.text {
        let padding = element.padding;
        let inner_width = rect.width.saturating_sub(padding.horizontal());
        if inner_width > 0 && rect.height > padding.vertical() {
            let fg = style.foreground.map(|c| c.to_rgb()).unwrap_or(Rgb::WHITE);
            let x = rect.x + i32::from(padding.left);
            let y = rect.y + i32::from(padding.top);
            let text = truncate_to_width(text, usize::from(inner_width));
            buf.put_str(x, y, &text, x + i32::from(inner_width), fg, style.text_style);
        }
    }

    for child in &element.children {
        if child.position == Position::Absolute {
            overlays.push(child);
        } else {
            paint(child, layout, sheet, buf, overlays);
        }
    }
}
