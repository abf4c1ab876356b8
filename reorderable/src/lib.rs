//! Drag-to-reorder for table columns.
//!
//! A [`ColumnReorderController`] attaches to one table in a
//! [`tabledom::Document`]. Pressing the mouse on a header cell lifts a
//! floating copy of it (the ghost) that follows the cursor horizontally,
//! while a placeholder highlights the column slot it would drop into.
//! Releasing reports the new column order through the `stop` callback.
//!
//! ```ignore
//! let options = ReorderOptions::default().on_stop(|order| println!("{order:?}"));
//! let mut controller = ColumnReorderController::new(&mut doc, "grid", options)?;
//!
//! for delivery in doc.dispatch(&event) {
//!     controller.handle(&mut doc, &delivery, &event);
//! }
//! ```

mod cache;
mod controller;
mod drag;
mod error;
mod options;
mod order;

pub use cache::ColumnPositionCache;
pub use controller::ColumnReorderController;
pub use drag::DragState;
pub use error::ReorderError;
pub use options::{ReorderOptions, StopCallback};
pub use order::{apply_column_order, move_column};
