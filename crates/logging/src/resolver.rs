//! crates/logging/src/resolver.rs
//! Hierarchical verbosity resolution.
//!
//! A [`LogSource`] expands into candidate configuration keys ordered from
//! most to least specific. Specificity is the number of `.` separators in a
//! key, so `top.cpu.fetch` beats `*.fetch`, which beats `top`. Leading
//! segments dropped from the scoped name are replaced by a `*.` wildcard.
//! Features and the type name add further keys under every prefix.
//!
//! The first key the provider answers decides the level. Keys built from the
//! full, un-wildcarded path are recorded as known parameter names so tools
//! can list what may be configured.

use std::cmp::Reverse;

use rustc_hash::FxHashMap;

use crate::level::VerbosityLevel;
use crate::provider::{ConfigProvider, lookup_level, parameter_name};
use crate::record::LogSource;
use crate::runtime::KnownParameters;

/// A configuration key to try, with its ranking data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateKey {
    key: String,
    interesting: bool,
}

impl CandidateKey {
    /// The key, without the `.log_level` suffix.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the key is recorded as a known parameter.
    #[must_use]
    pub const fn is_interesting(&self) -> bool {
        self.interesting
    }

    /// Number of `.` separators; higher is more specific.
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.key.matches('.').count()
    }
}

/// Insertion-ordered set of candidates; the first occurrence of a key keeps its position.
#[derive(Default)]
struct CandidateSet {
    keys: Vec<CandidateKey>,
    positions: FxHashMap<String, usize>,
}

impl CandidateSet {
    fn insert(&mut self, key: String, interesting: bool) {
        if let Some(&position) = self.positions.get(&key) {
            self.keys[position].interesting |= interesting;
            return;
        }
        self.positions.insert(key.clone(), self.keys.len());
        self.keys.push(CandidateKey { key, interesting });
    }

    fn into_ranked(self) -> Vec<CandidateKey> {
        let mut keys = self.keys;
        keys.sort_by_key(|candidate| Reverse(candidate.specificity()));
        keys
    }
}

fn segments(name: &str) -> Vec<&str> {
    if name.is_empty() {
        Vec::new()
    } else {
        name.split('.').collect()
    }
}

/// `a.b.c` yields `a.b.c`, `a.b`, `a`.
fn truncated_prefixes(name: &str) -> Vec<String> {
    let parts = segments(name);
    (1..=parts.len())
        .rev()
        .map(|end| parts[..end].join("."))
        .collect()
}

/// Builds the ranked candidate keys for `source`.
///
/// # Examples
///
/// ```
/// use logging::{LogSource, candidate_keys};
///
/// let keys: Vec<String> = candidate_keys(&LogSource::new("top.block"))
///     .iter()
///     .map(|candidate| candidate.key().to_owned())
///     .collect();
/// assert_eq!(keys, ["top.block", "*.block", "top", "*", ""]);
/// ```
#[must_use]
pub fn candidate_keys(source: &LogSource) -> Vec<CandidateKey> {
    let type_name = source.type_name();
    let feature_prefixes: Vec<String> = source
        .features()
        .iter()
        .flat_map(|feature| truncated_prefixes(feature))
        .collect();

    let mut set = CandidateSet::default();
    let path = segments(source.lookup_name());
    for end in (1..=path.len()).rev() {
        let prefix = &path[..end];
        for first in 0..prefix.len() {
            let tail = prefix[first..].join(".");
            let interesting = first == 0;
            let scoped = if interesting { tail } else { format!("*.{tail}") };

            for feature in &feature_prefixes {
                set.insert(format!("{scoped}.{feature}"), interesting);
            }
            if !type_name.is_empty() {
                set.insert(format!("{scoped}.{type_name}"), interesting);
            }
            set.insert(scoped, interesting);
        }
    }

    for feature in &feature_prefixes {
        set.insert(feature.clone(), true);
        set.insert(format!("*.{feature}"), false);
    }
    if !type_name.is_empty() {
        set.insert(type_name.to_owned(), true);
    }
    set.insert("*".to_owned(), false);
    set.insert(String::new(), false);

    set.into_ranked()
}

/// Resolves the effective threshold of a source against a provider.
pub struct VerbosityResolver<'a> {
    provider: Option<&'a dyn ConfigProvider>,
    known: &'a KnownParameters,
    default: VerbosityLevel,
}

impl<'a> VerbosityResolver<'a> {
    /// Creates a resolver that records known parameters in `known` and falls back to `default`.
    #[must_use]
    pub fn new(known: &'a KnownParameters, default: VerbosityLevel) -> Self {
        Self {
            provider: None,
            known,
            default,
        }
    }

    /// Sets the provider to consult; `None` always yields the default.
    #[must_use]
    pub fn with_provider(mut self, provider: Option<&'a dyn ConfigProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Resolves the threshold for `source`.
    pub fn resolve(&self, source: &LogSource) -> VerbosityLevel {
        let candidates = candidate_keys(source);
        for candidate in candidates.iter().filter(|c| c.is_interesting()) {
            self.known.insert(parameter_name(candidate.key()));
        }

        let Some(provider) = self.provider else {
            return self.default;
        };

        for candidate in &candidates {
            match lookup_level(provider, candidate.key()) {
                Ok(Some(level)) => {
                    tracing::debug!(
                        source = source.lookup_name(),
                        key = candidate.key(),
                        %level,
                        "resolved configured verbosity"
                    );
                    return level;
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::debug!(
                        source = source.lookup_name(),
                        %error,
                        "configuration provider unavailable, using default verbosity"
                    );
                    return self.default;
                }
            }
        }
        self.default
    }
}
