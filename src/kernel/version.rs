//! Base kernel version parsing.
//!
//! Every kernel artifact on a Debian-family system carries its base version
//! somewhere in its name: `linux-headers-6.1.0-18-common`,
//! `linux-image-6.1.0-18-amd64`, `6.1.0-18-amd64` (from `uname -r`). The
//! base version is the first ASCII `[0-9]+.[0-9]+.[0-9]+-[0-9]+` run in the
//! string.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static BASE_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+-[0-9]+").expect("Invalid base version regex"));

/// A kernel base version such as `6.1.0-18`.
///
/// Equality and hashing use the exact matched text. Ordering is numeric over
/// `(major, minor, patch, abi)`, the same order `sort -V` gives these tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelVersion {
    text: String,
    parts: [u64; 4],
}

impl KernelVersion {
    /// Extract the leftmost base version from `s`.
    ///
    /// Returns `None` when `s` contains no `MAJOR.MINOR.PATCH-ABI` run.
    pub fn extract(s: &str) -> Option<Self> {
        let m = BASE_VERSION_REGEX.find(s)?;
        let text = m.as_str();

        let mut parts = [0u64; 4];
        for (slot, field) in parts.iter_mut().zip(text.split(['.', '-'])) {
            // Digit runs longer than u64 still compare, just saturated.
            *slot = field.parse().unwrap_or(u64::MAX);
        }

        Some(Self {
            text: text.to_string(),
            parts,
        })
    }

    /// Compare `(major, minor, patch, abi)` numerically, ignoring the text.
    ///
    /// `6.1.0-018` and `6.1.0-18` are numerically equal here even though they
    /// are distinct versions.
    pub fn cmp_numeric(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }

    /// The matched version text, e.g. `6.1.0-18`.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Ord for KernelVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_numeric(other)
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for KernelVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
