//! Fragment boundary scanning over raw container bytes.
//!
//! A TEG 6s export is an opaque binary blob with whole XML documents
//! spliced into it. The device writes each document with an XML
//! declaration up front and the fixed root close tag at the back, so
//! boundaries can be recovered without parsing: every occurrence of the
//! open marker starts a fragment and every occurrence of the close
//! marker ends one.
//!
//! Opens and closes are paired positionally (first with first, second
//! with second). That is correct for the flat, concatenated layout the
//! device produces and knowingly wrong for nested or interleaved
//! documents, which pair across each other without detection.

use log::{debug, info};
use memchr::memmem;

use super::error::{Result, TegError};
use super::models::FragmentRange;

/// Scan `buffer` for fragment boundaries.
///
/// Collects the start offset of every non-overlapping occurrence of
/// `open_marker` and the end offset (one past the final byte) of every
/// non-overlapping occurrence of `close_marker`, left to right, then
/// zips the two lists in discovery order. No occurrence of either
/// marker is not an error: an empty container yields an empty list.
///
/// The returned ranges are a structural heuristic. Nothing checks that
/// `start < end` or that a range encloses a single well-formed
/// document; that is the parser's problem.
///
/// # Errors
/// Returns [`TegError::BoundaryMismatch`] when the two counts differ.
/// No ranges are produced in that case.
pub fn scan(buffer: &[u8], open_marker: &[u8], close_marker: &[u8]) -> Result<Vec<FragmentRange>> {
    let opens: Vec<usize> = memmem::find_iter(buffer, open_marker).collect();
    let closes: Vec<usize> = memmem::find_iter(buffer, close_marker)
        .map(|pos| pos + close_marker.len())
        .collect();

    if opens.len() != closes.len() {
        debug!("open marker offsets: {:?}", opens);
        debug!("close marker offsets: {:?}", closes);
        return Err(TegError::BoundaryMismatch {
            opens: opens.len(),
            closes: closes.len(),
        });
    }

    let ranges: Vec<FragmentRange> = opens
        .into_iter()
        .zip(closes)
        .map(|(start, end)| FragmentRange { start, end })
        .collect();

    info!("found {} XML fragment(s)", ranges.len());
    Ok(ranges)
}
