use std::fmt;

use serde::Deserialize;

/// Receives the final column identifiers, in their new order. Headers
/// without the identifier attribute show up as `None`.
pub type StopCallback = Box<dyn FnMut(&[Option<String>])>;

/// Controller configuration.
///
/// Everything except the `stop` callback can be deserialized, so hosts can
/// keep class names and selectors in a config file. Missing fields take
/// their defaults.
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReorderOptions {
    /// Class added to the ghost table, on top of the source table's classes.
    pub dragged_element_class: Option<String>,
    /// Class of the drop-slot placeholder.
    pub new_column_spot_placeholder_class: String,
    /// Attribute holding each column's identifier.
    pub data_header: String,
    /// Where the ghost and placeholder are appended.
    pub append_target_selector: String,
    /// Header cells that can be dragged.
    pub header_selector: String,
    /// Reserved. Has no effect.
    pub scroll: bool,
    /// Subtracted from the ghost's width and height so its border lines up
    /// with the original cell.
    pub border_allowance: u16,
    #[serde(skip)]
    pub stop: Option<StopCallback>,
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self {
            dragged_element_class: Some("dragged-header-table".to_string()),
            new_column_spot_placeholder_class: "dragged-header-new-column-spot-placeholder"
                .to_string(),
            data_header: "data-header".to_string(),
            append_target_selector: "body".to_string(),
            header_selector: "th:not(.no-drag)".to_string(),
            scroll: true,
            border_allowance: 1,
            stop: None,
        }
    }
}

impl ReorderOptions {
    pub fn on_stop(mut self, stop: impl FnMut(&[Option<String>]) + 'static) -> Self {
        self.stop = Some(Box::new(stop));
        self
    }

    pub fn header_selector(mut self, selector: impl Into<String>) -> Self {
        self.header_selector = selector.into();
        self
    }

    pub fn append_target_selector(mut self, selector: impl Into<String>) -> Self {
        self.append_target_selector = selector.into();
        self
    }

    pub fn data_header(mut self, attribute: impl Into<String>) -> Self {
        self.data_header = attribute.into();
        self
    }
}

impl fmt::Debug for ReorderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderOptions")
            .field("dragged_element_class", &self.dragged_element_class)
            .field(
                "new_column_spot_placeholder_class",
                &self.new_column_spot_placeholder_class,
            )
            .field("data_header", &self.data_header)
            .field("append_target_selector", &self.append_target_selector)
            .field("header_selector", &self.header_selector)
            .field("scroll", &self.scroll)
            .field("border_allowance", &self.border_allowance)
            .field("stop", &self.stop.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
