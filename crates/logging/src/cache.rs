//! Per-context memo of resolved thresholds.

use rustc_hash::FxHashMap;

use crate::level::VerbosityLevel;
use crate::record::LogSource;

const BKDR_SEED: u64 = 131;

/// BKDR string hash (seed 131) over `bytes`, continuing from `hash`.
fn bkdr(hash: u64, bytes: &[u8]) -> u64 {
    bytes.iter().fold(hash, |hash, &byte| {
        hash.wrapping_mul(BKDR_SEED).wrapping_add(u64::from(byte))
    })
}

/// Cache key for `source`: its lookup name and type name, separated by a NUL.
///
/// ```
/// use logging::{LogSource, source_hash};
///
/// let a = LogSource::new("top.a").with_type_name("T");
/// let b = LogSource::new("top.aT");
/// assert_ne!(source_hash(&a), source_hash(&b));
/// ```
#[must_use]
pub fn source_hash(source: &LogSource) -> u64 {
    let hash = bkdr(0, source.lookup_name().as_bytes());
    let hash = bkdr(hash, &[0]);
    bkdr(hash, source.type_name().as_bytes())
}

/// Resolved thresholds keyed by [`source_hash`].
///
/// Entries are never invalidated individually; the owning context clears the
/// whole cache when logging is reinitialized.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: FxHashMap<u64, VerbosityLevel>,
    hits: u64,
    misses: u64,
}

impl ResolutionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached threshold of `source`, calling `resolve` on a miss.
    pub fn get_or_resolve<F>(&mut self, source: &LogSource, resolve: F) -> VerbosityLevel
    where
        F: FnOnce(&LogSource) -> VerbosityLevel,
    {
        let key = source_hash(source);
        if let Some(&level) = self.entries.get(&key) {
            self.hits += 1;
            return level;
        }
        self.misses += 1;
        let level = resolve(source);
        tracing::trace!(source = source.lookup_name(), %level, "cached resolved verbosity");
        self.entries.insert(key, level);
        level
    }

    /// Cached threshold of `source`, without resolving.
    #[must_use]
    pub fn get(&self, source: &LogSource) -> Option<VerbosityLevel> {
        self.entries.get(&source_hash(source)).copied()
    }

    /// Drops every entry; hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to resolve.
    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bkdr_matches_reference_values() {
        assert_eq!(bkdr(0, b""), 0);
        assert_eq!(bkdr(0, b"a"), 97);
        assert_eq!(bkdr(0, b"ab"), 97 * 131 + 98);
    }

    #[test]
    fn second_lookup_hits() {
        let mut cache = ResolutionCache::new();
        let source = LogSource::new("top.cpu");
        let mut calls = 0;
        let first = cache.get_or_resolve(&source, |_| {
            calls += 1;
            VerbosityLevel::Debug
        });
        let second = cache.get_or_resolve(&source, |_| {
            calls += 1;
            VerbosityLevel::None
        });
        assert_eq!((first, second), (VerbosityLevel::Debug, VerbosityLevel::Debug));
        assert_eq!(calls, 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn type_name_distinguishes_entries() {
        let mut cache = ResolutionCache::new();
        let plain = LogSource::new("top");
        let typed = LogSource::new("top").with_type_name("Bus");
        cache.get_or_resolve(&plain, |_| VerbosityLevel::Info);
        cache.get_or_resolve(&typed, |_| VerbosityLevel::Trace);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&typed), Some(VerbosityLevel::Trace));
    }

    #[test]
    fn clear_forces_resolution() {
        let mut cache = ResolutionCache::new();
        let source = LogSource::new("top");
        cache.get_or_resolve(&source, |_| VerbosityLevel::Info);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(
            cache.get_or_resolve(&source, |_| VerbosityLevel::Error),
            VerbosityLevel::Error
        );
    }

    #[test]
    fn features_share_the_scoped_name_entry() {
        let a = LogSource::new("top").with_feature("x");
        let b = LogSource::new("top").with_feature("y");
        assert_eq!(source_hash(&a), source_hash(&b));
    }
}
