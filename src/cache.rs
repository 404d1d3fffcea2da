use crate::errors::CompileResult;
use crate::matcher::{MatchResult, PathMatcher, compile_with};
use crate::options::{CompileOptions, CompileOptionsError};
use hashbrown::HashMap as FastHashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Host-side memo of compiled matchers keyed by pattern text. Compilation
/// itself never consults it.
#[derive(Debug)]
pub struct MatcherCache {
    options: CompileOptions,
    compiled: Mutex<RecentMatchers>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for MatcherCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl MatcherCache {
    pub fn new(capacity: usize) -> Self {
        Self::build(capacity, CompileOptions::default())
    }

    pub fn with_options(
        capacity: usize,
        options: CompileOptions,
    ) -> Result<Self, CompileOptionsError> {
        options.validate()?;
        Ok(Self::build(capacity, options))
    }

    fn build(capacity: usize, options: CompileOptions) -> Self {
        Self {
            options,
            compiled: Mutex::new(RecentMatchers::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Returns the cached matcher for `pattern`, compiling it on a miss.
    /// Failed compilations are not cached.
    #[tracing::instrument(level = "trace", skip(self), fields(pattern_len = pattern.len() as u64))]
    pub fn get_or_compile(&self, pattern: &str) -> CompileResult<Arc<PathMatcher>> {
        if let Some(found) = self.compiled.lock().touch(pattern) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(found);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        // compiled outside the lock; a racing miss on the same pattern just
        // overwrites an equivalent matcher
        let matcher = Arc::new(compile_with(pattern, &self.options)?);
        if let Some(evicted) = self.compiled.lock().store(pattern, Arc::clone(&matcher)) {
            tracing::trace!(pattern = &*evicted, "evicted compiled matcher");
        }
        Ok(matcher)
    }

    pub fn match_path(&self, path: &str, pattern: &str) -> CompileResult<MatchResult> {
        Ok(self.get_or_compile(pattern)?.match_path(path))
    }

    /// `(hits, misses)` since construction.
    pub fn metrics(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    pub fn len(&self) -> usize {
        self.compiled.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.compiled.lock().capacity
    }

    /// Drops every cached matcher. Metrics are kept.
    pub fn clear(&self) {
        self.compiled.lock().entries.clear();
    }
}

#[derive(Debug)]
struct Recent {
    matcher: Arc<PathMatcher>,
    last_used: u64,
}

/// Matchers stamped with a logical clock; the smallest stamp is evicted first.
#[derive(Debug)]
struct RecentMatchers {
    capacity: usize,
    clock: u64,
    entries: FastHashMap<Box<str>, Recent>,
}

impl RecentMatchers {
    fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            clock: 0,
            entries: FastHashMap::with_capacity(capacity),
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn touch(&mut self, pattern: &str) -> Option<Arc<PathMatcher>> {
        let now = self.tick();
        let recent = self.entries.get_mut(pattern)?;
        recent.last_used = now;
        Some(Arc::clone(&recent.matcher))
    }

    /// Inserts or replaces `pattern`, returning the key evicted to make room.
    fn store(&mut self, pattern: &str, matcher: Arc<PathMatcher>) -> Option<Box<str>> {
        let now = self.tick();
        if let Some(recent) = self.entries.get_mut(pattern) {
            recent.matcher = matcher;
            recent.last_used = now;
            return None;
        }

        let mut evicted = None;
        if self.entries.len() >= self.capacity
            && let Some(stale) = self
                .entries
                .iter()
                .min_by_key(|(_, recent)| recent.last_used)
                .map(|(key, _)| key.clone())
        {
            self.entries.remove(&stale);
            evicted = Some(stale);
        }

        self.entries.insert(
            pattern.into(),
            Recent {
                matcher,
                last_used: now,
            },
        );
        evicted
    }
}
