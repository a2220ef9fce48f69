//! Core TEG export reader module

pub mod error;
pub mod models;
pub mod parser;
pub mod scanner;

use std::fs;
use std::path::{Path, PathBuf};
use std::vec::IntoIter;

use log::info;

pub use error::{Result, TegError};
use models::{close_marker, FragmentRange, XmlValue, XML_DECLARATION};

/// The main reader for TEG 6s export containers.
///
/// Loads the whole container into memory at construction and keeps it
/// for the reader's lifetime. Fragment offsets are recomputed per call;
/// the buffer never changes, so rescanning is idempotent and cheap next
/// to the XML work that follows.
#[derive(Debug)]
pub struct TegReader {
    file_path: Option<PathBuf>,
    contents: Vec<u8>,
}

impl TegReader {
    /// Read a TEG export container from the given path.
    ///
    /// The file is read in binary mode, entire contents up front;
    /// exports are at most a few megabytes.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening TEG export: {}", path.display());
        let contents = fs::read(path)?;
        info!("Read {} bytes of raw export data", contents.len());
        Ok(Self {
            file_path: Some(path.to_path_buf()),
            contents,
        })
    }

    /// Wrap an already-loaded container buffer.
    pub fn from_bytes(contents: Vec<u8>) -> Self {
        Self {
            file_path: None,
            contents,
        }
    }

    /// Path this reader was opened from, if it came from a file.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Size of the raw container in bytes.
    pub fn raw_len(&self) -> usize {
        self.contents.len()
    }

    /// Raw container bytes.
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Locate every embedded XML fragment in the container.
    ///
    /// # Errors
    /// Returns [`TegError::BoundaryMismatch`] when the open and close
    /// marker counts differ (see [`scanner::scan`]).
    pub fn fragments(&self) -> Result<Vec<FragmentRange>> {
        scanner::scan(&self.contents, XML_DECLARATION, &close_marker())
    }

    /// Borrow the raw bytes of one fragment.
    ///
    /// # Errors
    /// Returns [`TegError::FragmentOutOfRange`] if the range does not fit
    /// inside the container. Possible for ranges the scanner paired from
    /// out-of-order markers, which it does not validate.
    pub fn fragment_bytes(&self, range: &FragmentRange) -> Result<&[u8]> {
        if range.start > range.end || range.end > self.contents.len() {
            return Err(TegError::FragmentOutOfRange {
                start: range.start,
                end: range.end,
                buffer_len: self.contents.len(),
            });
        }
        Ok(&self.contents[range.start..range.end])
    }

    /// Iterate over the parsed documents of every fragment.
    ///
    /// Boundary scanning happens up front, so a mismatched container
    /// fails here; parse failures of individual fragments surface per
    /// item instead of aborting the iteration.
    pub fn documents(&self) -> Result<Documents<'_>> {
        Ok(Documents {
            reader: self,
            ranges: self.fragments()?.into_iter(),
        })
    }
}

/// Iterator over parsed fragment documents.
///
/// Created by [`TegReader::documents`]. Yields one `Result<XmlValue>`
/// per fragment, in container order.
pub struct Documents<'a> {
    reader: &'a TegReader,
    ranges: IntoIter<FragmentRange>,
}

impl<'a> Iterator for Documents<'a> {
    type Item = Result<XmlValue>;

    fn next(&mut self) -> Option<Self::Item> {
        let range = self.ranges.next()?;
        Some(
            self.reader
                .fragment_bytes(&range)
                .and_then(parser::parse_document),
        )
    }
}
