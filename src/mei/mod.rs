//! MEI document store
//!
//! Reads MEI text into a [`MeiDocument`](crate::models::MeiDocument), writes
//! it back, and manages the `.mei` files of an editing directory.
//!
//! - `reader`: roxmltree-based parsing
//! - `writer`: quick-xml serialization
//! - `store`: file loading/saving with an explicit [`StoreConfig`]

pub mod reader;
pub mod writer;
pub mod store;

pub use reader::parse_mei;
pub use writer::write_mei;
pub use store::{MeiStore, StoreConfig};

use thiserror::Error;

use crate::errors::EditError;

/// Errors from loading, saving or editing a stored document
#[derive(Debug, Error)]
pub enum MeiError {
    /// Text is not well-formed XML, or could not be written as XML
    #[error("XML error: {0}")]
    Xml(String),

    /// XML is fine but the document cannot be represented
    #[error("Invalid MEI document: {0}")]
    InvalidDocument(String),

    /// File name that would escape the store directory
    #[error("Invalid document name: {0}")]
    InvalidName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Edit(#[from] EditError),
}

pub type MeiResult<T> = Result<T, MeiError>;
