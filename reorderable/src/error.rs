use tabledom::SelectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReorderError {
    #[error("table element {0:?} not found")]
    TableNotFound(String),
    #[error("invalid {option}")]
    InvalidSelector {
        option: &'static str,
        #[source]
        source: SelectorError,
    },
}
