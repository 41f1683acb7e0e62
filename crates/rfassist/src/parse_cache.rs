//
// parse_cache.rs
//
// Revision-keyed cache of parsed suite files. Concurrent callers share
// one parse per document revision instead of reparsing per request.
//

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use url::Url;

use crate::document::TextDocument;
use crate::parser::RobotFile;

#[derive(Debug, Clone)]
struct CacheEntry {
    revision: u64,
    file: Arc<RobotFile>,
}

/// Shared cache mapping document URIs to their parsed form.
///
/// An entry is fresh while its stored revision matches the document's
/// current revision counter. Stale entries are replaced in place on the
/// next lookup; nothing is evicted otherwise, so `invalidate` is the way
/// to drop a closed document.
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: DashMap<Url, CacheEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed form of `document`, reusing the cached parse when the
    /// revision still matches.
    pub fn get(&self, document: &TextDocument) -> Arc<RobotFile> {
        let uri = document.uri();
        let revision = document.revision();
        if let Some(entry) = self.entries.get(uri) {
            if entry.revision == revision {
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::trace!("parse cache hit for {uri} at revision {revision}");
                return Arc::clone(&entry.file);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("parse cache miss for {uri}, parsing revision {revision}");
        let file = Arc::new(RobotFile::parse(&document.text()));
        self.entries.insert(
            uri.clone(),
            CacheEntry {
                revision,
                file: Arc::clone(&file),
            },
        );
        file
    }

    /// Drop the entry for a document, if present. Returns whether one was
    /// removed.
    pub fn invalidate(&self, uri: &Url) -> bool {
        self.entries.remove(uri).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups served from cache since construction.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that had to parse since construction.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
