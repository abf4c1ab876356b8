//! Drag column headers to reorder them.
//!
//! Usage: `reorderable-demo [options.json]`. The optional JSON file holds
//! `ReorderOptions` fields in camelCase. Press `q` or Esc to quit; logs go
//! to `reorderable-demo.log`.

use std::fs::File;
use std::io;
use std::sync::mpsc;

use crossterm::event::{Event as CtEvent, KeyCode, KeyEventKind};
use log::info;
use reorderable::{apply_column_order, ColumnReorderController, ReorderOptions};
use simplelog::{Config, LevelFilter, WriteLogger};
use tabledom::{
    Color, Document, Edges, Element, MouseEvent, Selector, SelectorError, Style, Stylesheet,
    Terminal,
};

const TABLE_ID: &str = "planets";

const COLUMNS: [(&str, &str); 4] = [
    ("name", "Planet"),
    ("moons", "Moons"),
    ("radius", "Radius (km)"),
    ("day", "Day length"),
];

const ROWS: [[&str; 4]; 5] = [
    ["Mercury", "0", "2,440", "4,223 h"],
    ["Venus", "0", "6,052", "2,802 h"],
    ["Earth", "1", "6,371", "24 h"],
    ["Mars", "2", "3,390", "24.7 h"],
    ["Jupiter", "95", "69,911", "9.9 h"],
];

fn main() -> io::Result<()> {
    let log_file = File::create("reorderable-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let options = load_options(std::env::args().nth(1))?;
    let header_selector = Selector::parse(&options.header_selector).map_err(invalid_input)?;
    let data_header = options.data_header.clone();

    let (order_tx, order_rx) = mpsc::channel();
    let options = options.on_stop(move |order| {
        let _ = order_tx.send(order.to_vec());
    });

    let mut doc = Document::new(ui());
    let mut controller =
        ColumnReorderController::new(&mut doc, TABLE_ID, options).map_err(invalid_input)?;
    let sheet = stylesheet(&controller).map_err(invalid_input)?;

    let mut term = Terminal::new()?;

    loop {
        term.draw(&doc, &sheet)?;

        for event in term.poll(None)? {
            match event {
                CtEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        controller.destroy(&mut doc);
                        return Ok(());
                    }
                }
                CtEvent::Mouse(mouse) => {
                    let Some(event) = MouseEvent::from_crossterm(&mouse) else {
                        continue;
                    };
                    for delivery in doc.dispatch(&event) {
                        controller.handle(&mut doc, &delivery, &event);
                    }
                }
                _ => {}
            }
        }

        while let Ok(order) = order_rx.try_recv() {
            info!("New column order: {:?}", order);
            apply_column_order(&mut doc, TABLE_ID, &header_selector, &data_header, &order);
        }
    }
}

fn load_options(path: Option<String>) -> io::Result<ReorderOptions> {
    let Some(path) = path else {
        return Ok(ReorderOptions::default());
    };
    info!("Loading options from {}", path);
    let file = File::open(&path)?;
    serde_json::from_reader(io::BufReader::new(file)).map_err(invalid_input)
}

fn invalid_input(err: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

fn ui() -> Element {
    let header_padding = Edges::symmetric(1, 2);
    let cell_padding = Edges::symmetric(0, 2);

    let header_row = Element::tr()
        .child(Element::th("#").class("no-drag").padding(header_padding))
        .children(COLUMNS.iter().map(|(id, title)| {
            Element::th(*title)
                .attr("data-header", *id)
                .padding(header_padding)
        }));

    let body_rows = ROWS.iter().enumerate().map(|(index, row)| {
        Element::tr()
            .child(Element::td((index + 1).to_string()).padding(cell_padding))
            .children(row.iter().map(|value| Element::td(*value).padding(cell_padding)))
    });

    Element::body()
        .padding(Edges::new(1, 0, 0, 2))
        .child(Element::div().class("title").text("Drag a header to reorder columns. q quits."))
        .child(Element::div().height(1))
        .child(
            Element::table()
                .id(TABLE_ID)
                .class("grid")
                .child(header_row)
                .children(body_rows),
        )
}

fn stylesheet(controller: &ColumnReorderController) -> Result<Stylesheet, SelectorError> {
    let options = controller.options();
    // The ghost is a copy of a header cell and picks up the `th` rule.
    let mut sheet = Stylesheet::new()
        .rule(".title", Style::new().foreground(Color::oklch(0.85, 0.05, 250.0)))?
        .rule(
            "th",
            Style::new()
                .background(Color::oklch(0.3, 0.05, 250.0))
                .foreground(Color::oklch(0.95, 0.02, 250.0))
                .bold(),
        )?
        .rule("th.no-drag", Style::new().foreground(Color::oklch(0.6, 0.02, 250.0)))?
        .rule("td", Style::new().foreground(Color::oklch(0.85, 0.02, 250.0)))?;

    sheet.add(
        &format!(".{}", options.new_column_spot_placeholder_class),
        Style::new().background(Color::oklch(0.4, 0.1, 140.0)),
    )?;
    Ok(sheet)
}
