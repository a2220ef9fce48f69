//! # teg-reader
//!
//! A reader for TEG 6s analyzer export containers: binary files with one
//! or more complete XML documents spliced into them. The reader locates
//! the embedded fragments by their boundary markers, slices them out,
//! and converts each one into a nested key/value document.
pub mod teg;

// Re-export the main types for convenience
pub use teg::{
    error::{Result, TegError},
    models::{close_marker, FragmentRange, XmlValue, ROOT_ELEMENT, XML_DECLARATION},
    parser::parse_document,
    scanner::scan,
    Documents, TegReader,
};
