//! Data types for the cleanup flow.

use crate::kernel::KernelVersion;
use std::fmt;
use std::path::PathBuf;

/// Kernel package family, derived from the package name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageCategory {
    Image,
    Headers,
    Modules,
    Tools,
}

impl PackageCategory {
    /// All categories, in purge order.
    pub const ALL: [PackageCategory; 4] = [
        PackageCategory::Image,
        PackageCategory::Headers,
        PackageCategory::Modules,
        PackageCategory::Tools,
    ];

    /// Package name prefix identifying this category.
    pub fn prefix(self) -> &'static str {
        match self {
            PackageCategory::Image => "linux-image-",
            PackageCategory::Headers => "linux-headers-",
            PackageCategory::Modules => "linux-modules-",
            PackageCategory::Tools => "linux-tools-",
        }
    }

    /// Category of `name`; the first matching prefix wins.
    pub fn from_package_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| name.starts_with(category.prefix()))
    }
}

impl fmt::Display for PackageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageCategory::Image => write!(f, "Images"),
            PackageCategory::Headers => write!(f, "Headers"),
            PackageCategory::Modules => write!(f, "Modules"),
            PackageCategory::Tools => write!(f, "Tools"),
        }
    }
}

/// An installed kernel-related package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub category: PackageCategory,
    /// Base version, absent for unversioned meta-packages.
    pub version: Option<KernelVersion>,
}

impl InstalledPackage {
    /// Describe `name`, or `None` when it is not a kernel package.
    pub fn parse(name: &str) -> Option<Self> {
        Some(Self {
            name: name.to_string(),
            category: PackageCategory::from_package_name(name)?,
            version: KernelVersion::extract(name),
        })
    }
}

/// Why a package stayed out of the removal plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepReason {
    /// Its base version is protected.
    Protected(KernelVersion),
    /// No base version could be read from its name.
    Unversioned,
    /// The name matches none of the kernel package prefixes.
    NotKernelPackage,
}

impl fmt::Display for KeepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeepReason::Protected(version) => write!(f, "protected {}", version),
            KeepReason::Unversioned => write!(f, "no version"),
            KeepReason::NotKernelPackage => write!(f, "not a kernel package"),
        }
    }
}

/// A package left installed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptPackage {
    pub name: String,
    pub reason: KeepReason,
}

/// Packages to purge, grouped by category in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalPlan {
    pub images: Vec<String>,
    pub headers: Vec<String>,
    pub modules: Vec<String>,
    pub tools: Vec<String>,
    /// Every package that was considered and kept.
    pub kept: Vec<KeptPackage>,
}

impl RemovalPlan {
    /// Packages to purge in `category`.
    pub fn bucket(&self, category: PackageCategory) -> &[String] {
        match category {
            PackageCategory::Image => &self.images,
            PackageCategory::Headers => &self.headers,
            PackageCategory::Modules => &self.modules,
            PackageCategory::Tools => &self.tools,
        }
    }

    pub(crate) fn bucket_mut(&mut self, category: PackageCategory) -> &mut Vec<String> {
        match category {
            PackageCategory::Image => &mut self.images,
            PackageCategory::Headers => &mut self.headers,
            PackageCategory::Modules => &mut self.modules,
            PackageCategory::Tools => &mut self.tools,
        }
    }

    /// True when nothing is scheduled for purging.
    pub fn is_empty(&self) -> bool {
        PackageCategory::ALL
            .into_iter()
            .all(|category| self.bucket(category).is_empty())
    }

    /// Number of packages scheduled for purging.
    pub fn len(&self) -> usize {
        PackageCategory::ALL
            .into_iter()
            .map(|category| self.bucket(category).len())
            .sum()
    }

    /// All packages to purge: images, headers, modules, then tools.
    pub fn packages(&self) -> Vec<String> {
        PackageCategory::ALL
            .into_iter()
            .flat_map(|category| self.bucket(category).iter().cloned())
            .collect()
    }
}

/// A kernel directory with no protected version behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanedDirectory {
    pub path: PathBuf,
    pub version: KernelVersion,
}

/// Summary of a directory sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// Directories removed (or that would be removed in a dry sweep).
    pub removed: Vec<PathBuf>,
    /// Directories whose removal failed, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Flags controlling a cleanup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Skip the confirmation prompt and run the package manager non-interactively.
    pub assume_yes: bool,
    /// Inspect and print the plan only.
    pub dry_run: bool,
}

/// Results of a run that went all the way through purge and sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub plan: RemovalPlan,
    pub sweep: SweepResult,
    /// Used-space delta in kilobytes (positive means space was freed);
    /// `None` when usage could not be measured.
    pub reclaimed_kb: Option<i64>,
}

/// How a cleanup run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The package query returned no kernel packages.
    NothingToDo,
    /// Dry run: the plan was printed and nothing was touched.
    DryRun(RemovalPlan),
    /// The user declined the confirmation prompt.
    Aborted(RemovalPlan),
    /// Purge (if any) and sweep ran.
    Completed(CleanupReport),
}
