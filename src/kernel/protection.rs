//! Protected version set: the running kernel plus the newest installed image.

use super::version::KernelVersion;
use std::collections::HashSet;

const IMAGE_PREFIX: &str = "linux-image-";

/// Base versions that must never be removed during this run.
///
/// Built once from the running kernel release and the newest installed image
/// package. Either input may fail to yield a version, in which case it simply
/// contributes nothing.
#[derive(Debug, Clone, Default)]
pub struct ProtectedVersions {
    versions: HashSet<KernelVersion>,
}

impl ProtectedVersions {
    /// Build the set from the running kernel release (`uname -r`) and the
    /// name of the newest installed image package, if one was found.
    pub fn build(current_release: &str, newest_image: Option<&str>) -> Self {
        let versions = [Some(current_release), newest_image]
            .into_iter()
            .flatten()
            .filter_map(KernelVersion::extract)
            .collect();

        Self { versions }
    }

    /// Whether the base version embedded in `name` is protected.
    ///
    /// `name` is a raw package or directory name; the version is re-extracted
    /// from it. A name without a version is never protected.
    pub fn is_protected(&self, name: &str) -> bool {
        KernelVersion::extract(name).is_some_and(|v| self.contains(&v))
    }

    /// Whether `version` is protected.
    pub fn contains(&self, version: &KernelVersion) -> bool {
        self.versions.contains(version)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Protected versions in ascending version order.
    pub fn sorted(&self) -> Vec<&KernelVersion> {
        let mut versions: Vec<_> = self.versions.iter().collect();
        versions.sort();
        versions
    }
}

/// Find the newest versioned, signed kernel image among `packages`.
///
/// Unversioned meta-packages and `unsigned` companion packages are ignored.
/// On equal versions the package enumerated last wins.
pub fn newest_image_package<S: AsRef<str>>(packages: &[S]) -> Option<&str> {
    packages
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|name| name.starts_with(IMAGE_PREFIX) && !name.contains("unsigned"))
        .filter_map(|name| KernelVersion::extract(name).map(|v| (v, name)))
        // max_by returns the last of several equal maxima.
        .max_by(|(a, _), (b, _)| a.cmp_numeric(b))
        .map(|(_, name)| name)
}
