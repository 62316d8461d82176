//! What gets probed: required types and optional features.

use std::collections::BTreeMap;
use std::fmt;

use crate::core::platform::TargetOs;

/// Kind of optional probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProbeKind {
    /// Compile `#include <name>`
    Header,
    /// Link an empty program with `-l<name>`
    Library,
    /// Link a program calling `name`
    Function,
}

impl ProbeKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::Header => "header",
            ProbeKind::Library => "library",
            ProbeKind::Function => "function",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type the engine cannot be built without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRequirement {
    pub name: &'static str,
    /// Required `sizeof`, or 0 for any size
    pub min_size: usize,
    /// Target that lacks the type and handles it elsewhere
    pub skip_on: Option<TargetOs>,
}

impl TypeRequirement {
    /// Whether this requirement is checked for `os`.
    pub fn applies_to(&self, os: TargetOs) -> bool {
        self.skip_on != Some(os)
    }
}

/// Required types, in check order.
///
/// `off_t` and `size_t` must agree in size and `time_t` must fit a `uint64_t`.
/// Windows has no `off_t`; the engine supplies its own there.
pub const REQUIRED_TYPES: &[TypeRequirement] = &[
    TypeRequirement { name: "pid_t", min_size: 0, skip_on: None },
    TypeRequirement { name: "off_t", min_size: 8, skip_on: Some(TargetOs::Windows) },
    TypeRequirement { name: "size_t", min_size: 8, skip_on: None },
    TypeRequirement { name: "ssize_t", min_size: 8, skip_on: None },
    TypeRequirement { name: "time_t", min_size: 8, skip_on: None },
    TypeRequirement { name: "uintmax_t", min_size: 0, skip_on: None },
    TypeRequirement { name: "uintptr_t", min_size: 0, skip_on: None },
];

/// An optional capability and the definition it turns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalFeature {
    pub kind: ProbeKind,
    pub name: &'static str,
    /// Definition token emitted when present
    pub define: &'static str,
    /// Target where the probe result cannot be trusted and is never run
    pub skip_on: Option<TargetOs>,
}

impl OptionalFeature {
    const fn new(kind: ProbeKind, name: &'static str, define: &'static str) -> Self {
        OptionalFeature {
            kind,
            name,
            define,
            skip_on: None,
        }
    }

    /// Whether this feature is probed for `os`.
    pub fn applies_to(&self, os: TargetOs) -> bool {
        self.skip_on != Some(os)
    }
}

use ProbeKind::{Function, Header, Library};

/// Optional probes, in probe order. Libraries come before functions so that
/// function probes link against them.
pub const OPTIONAL_FEATURES: &[OptionalFeature] = &[
    OptionalFeature::new(Header, "x86intrin.h", "HAVE_X86INTRIN_H=1"),
    OptionalFeature::new(Library, "dl", "HAVE_LIBDL=1"),
    OptionalFeature::new(Library, "pthread", "HAVE_LIBPTHREAD=1"),
    OptionalFeature::new(Function, "clock_gettime", "HAVE_CLOCK_GETTIME=1"),
    OptionalFeature::new(Function, "fallocate", "HAVE_FALLOCATE=1"),
    // Darwin reports fdatasync but does not implement it.
    OptionalFeature {
        kind: Function,
        name: "fdatasync",
        define: "HAVE_FDATASYNC=1",
        skip_on: Some(TargetOs::Darwin),
    },
    OptionalFeature::new(Function, "ftruncate", "HAVE_FTRUNCATE=1"),
    OptionalFeature::new(Function, "gettimeofday", "HAVE_GETTIMEOFDAY=1"),
    OptionalFeature::new(Function, "posix_fadvise", "HAVE_FADVISE=1"),
    OptionalFeature::new(Function, "posix_fallocate", "HAVE_FALLOCATE=1"),
    OptionalFeature::new(Function, "posix_madvise", "HAVE_MADVISE=1"),
    OptionalFeature::new(Function, "posix_memalign", "HAVE_MEMALIGN=1"),
    OptionalFeature::new(Function, "setrlimit", "HAVE_SETRLIMIT=1"),
    OptionalFeature::new(Function, "strtouq", "HAVE_STRTOUQ=1"),
    OptionalFeature::new(Function, "sync_file_range", "HAVE_SYNC_FILE_RANGE=1"),
    OptionalFeature::new(Function, "timer_create", "HAVE_TIMER_CREATE=1"),
];

/// Presence of each probed feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResults {
    outcomes: BTreeMap<(ProbeKind, String), bool>,
}

impl ProbeResults {
    /// Create an empty result set.
    pub fn new() -> Self {
        ProbeResults::default()
    }

    /// Record the outcome of one probe.
    pub fn record(&mut self, kind: ProbeKind, name: impl Into<String>, present: bool) {
        self.outcomes.insert((kind, name.into()), present);
    }

    /// Builder-style [`record`](Self::record) for a present feature.
    pub fn with(mut self, kind: ProbeKind, name: &str) -> Self {
        self.record(kind, name, true);
        self
    }

    /// Whether the feature was probed and found. Unprobed features are absent.
    pub fn is_present(&self, kind: ProbeKind, name: &str) -> bool {
        self.outcomes
            .get(&(kind, name.to_string()))
            .copied()
            .unwrap_or(false)
    }

    /// Whether the feature was probed at all.
    pub fn was_probed(&self, kind: ProbeKind, name: &str) -> bool {
        self.outcomes.contains_key(&(kind, name.to_string()))
    }

    /// Number of features found.
    pub fn found_count(&self) -> usize {
        self.outcomes.values().filter(|&&present| present).count()
    }

    /// Number of features probed.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether nothing was probed.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_t_skipped_on_windows_only() {
        let off_t = REQUIRED_TYPES.iter().find(|t| t.name == "off_t").unwrap();
        assert!(!off_t.applies_to(TargetOs::Windows));
        assert!(off_t.applies_to(TargetOs::Linux));
        assert!(off_t.applies_to(TargetOs::Darwin));
    }

    #[test]
    fn test_size_sensitive_types() {
        let sized: Vec<&str> = REQUIRED_TYPES
            .iter()
            .filter(|t| t.min_size == 8)
            .map(|t| t.name)
            .collect();
        assert_eq!(sized, vec!["off_t", "size_t", "ssize_t", "time_t"]);
    }

    #[test]
    fn test_libraries_probe_before_functions() {
        let first_function = OPTIONAL_FEATURES
            .iter()
            .position(|f| f.kind == ProbeKind::Function)
            .unwrap();
        assert!(OPTIONAL_FEATURES[first_function..]
            .iter()
            .all(|f| f.kind == ProbeKind::Function));
    }

    #[test]
    fn test_results_default_absent() {
        let mut results = ProbeResults::new();
        assert!(!results.is_present(ProbeKind::Library, "dl"));
        assert!(!results.was_probed(ProbeKind::Library, "dl"));

        results.record(ProbeKind::Library, "dl", false);
        results.record(ProbeKind::Function, "fallocate", true);
        assert!(results.was_probed(ProbeKind::Library, "dl"));
        assert!(!results.is_present(ProbeKind::Library, "dl"));
        assert!(results.is_present(ProbeKind::Function, "fallocate"));
        assert_eq!(results.found_count(), 1);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_empty_results_and_kind_names() {
        let results = ProbeResults::new();
        assert!(results.is_empty());
        assert_eq!(results.found_count(), 0);
        assert!(!ProbeResults::new().with(ProbeKind::Header, "x86intrin.h").is_empty());

        assert_eq!(ProbeKind::Header.as_str(), "header");
        assert_eq!(ProbeKind::Library.to_string(), "library");
        assert_eq!(ProbeKind::Function.to_string(), "function");
    }
}
