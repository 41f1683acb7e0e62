//
// document.rs
//
// In-memory suite documents: rope-backed text plus an edit revision so
// downstream caches can tell stale parses from fresh ones.
//

use std::ops::Range;

use ropey::Rope;
use thiserror::Error;
use url::Url;

/// A location that does not exist in the document it was asked about.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BadLocation {
    #[error("char offset {offset} is past the end of the document ({len} chars)")]
    OffsetOutOfBounds { offset: usize, len: usize },
    #[error("line {line} is past the end of the document ({lines} lines)")]
    LineOutOfBounds { line: usize, lines: usize },
}

/// An open suite document.
///
/// All positions are char offsets and char-based line/column pairs; byte
/// offsets never appear in this API. The revision counter starts at 0 and
/// increments on every mutation, including edits that happen to restore
/// earlier text.
#[derive(Debug, Clone)]
pub struct TextDocument {
    uri: Url,
    contents: Rope,
    version: Option<i32>,
    revision: u64,
}

impl TextDocument {
    pub fn new(uri: Url, text: &str, version: Option<i32>) -> Self {
        Self {
            uri,
            contents: Rope::from_str(text),
            version,
            revision: 0,
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn text(&self) -> String {
        self.contents.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.contents.len_chars()
    }

    pub fn len_lines(&self) -> usize {
        self.contents.len_lines()
    }

    /// Editor-assigned document version, if the client sent one.
    pub fn version(&self) -> Option<i32> {
        self.version
    }

    /// Record the editor's version number. Does not touch the revision:
    /// version is bookkeeping about the client, not about the text.
    pub fn set_version(&mut self, version: Option<i32>) {
        self.version = version;
    }

    /// Monotonic edit counter used as the parse cache key.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Line containing the given char offset. An offset equal to
    /// `len_chars()` is the end-of-file position and belongs to the last
    /// line.
    pub fn line_of_offset(&self, offset: usize) -> Result<usize, BadLocation> {
        if offset > self.contents.len_chars() {
            return Err(BadLocation::OffsetOutOfBounds {
                offset,
                len: self.contents.len_chars(),
            });
        }
        Ok(self.contents.char_to_line(offset))
    }

    /// Char offset at which the given line starts.
    pub fn offset_of_line(&self, line: usize) -> Result<usize, BadLocation> {
        if line >= self.contents.len_lines() {
            return Err(BadLocation::LineOutOfBounds {
                line,
                lines: self.contents.len_lines(),
            });
        }
        Ok(self.contents.line_to_char(line))
    }

    /// Replace the whole text, as a full-content sync does.
    pub fn set_text(&mut self, text: &str) {
        self.contents = Rope::from_str(text);
        self.revision += 1;
    }

    /// Replace the chars in `range` with `replacement`.
    pub fn splice(&mut self, range: Range<usize>, replacement: &str) -> Result<(), BadLocation> {
        let len = self.contents.len_chars();
        if range.end > len {
            return Err(BadLocation::OffsetOutOfBounds {
                offset: range.end,
                len,
            });
        }
        if range.start > range.end {
            return Err(BadLocation::OffsetOutOfBounds {
                offset: range.start,
                len,
            });
        }
        self.contents.remove(range.clone());
        self.contents.insert(range.start, replacement);
        self.revision += 1;
        log::trace!(
            "spliced {} at {}..{}, revision now {}",
            self.uri,
            range.start,
            range.end,
            self.revision
        );
        Ok(())
    }
}
