//! Custom error types for the teg-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum TegError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The number of XML declarations in a container does not match the
    /// number of root close tags.
    ///
    /// Fragments are paired positionally, so unequal counts mean no
    /// trustworthy pairing exists. Callers that prefer the lenient
    /// behavior of the device's own tooling can match this variant and
    /// substitute an empty fragment list.
    #[error("mismatched fragment boundaries: {opens} open marker(s), {closes} close marker(s)")]
    BoundaryMismatch { opens: usize, closes: usize },

    /// A fragment range does not fit inside the container it was scanned from.
    #[error("fragment range {start}..{end} out of bounds for {buffer_len}-byte container")]
    FragmentOutOfRange {
        start: usize,
        end: usize,
        buffer_len: usize,
    },

    /// An error reported by the XML reader while walking a fragment.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A fragment is structurally unusable as a single XML document.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// A convenience `Result` type alias using the crate's `TegError` type.
pub type Result<T> = std::result::Result<T, TegError>;
