//! Package classification: which installed kernel packages get purged.

use super::types::{InstalledPackage, KeepReason, KeptPackage, RemovalPlan};
use crate::kernel::ProtectedVersions;

/// Split `packages` into a removal plan.
///
/// A package is scheduled for purging only when it is a kernel package (by
/// name prefix), carries a base version, and that version is not protected.
/// Everything else is recorded in `kept`. Enumeration order is preserved
/// within each bucket.
pub fn classify_packages<S: AsRef<str>>(
    packages: &[S],
    protection: &ProtectedVersions,
) -> RemovalPlan {
    let mut plan = RemovalPlan::default();

    for name in packages.iter().map(AsRef::<str>::as_ref) {
        let Some(package) = InstalledPackage::parse(name) else {
            tracing::debug!(package = name, "not a kernel package, ignoring");
            plan.kept.push(kept(name, KeepReason::NotKernelPackage));
            continue;
        };

        match package.version {
            None => {
                tracing::debug!(package = name, "no base version, keeping");
                plan.kept.push(kept(name, KeepReason::Unversioned));
            }
            Some(version) if protection.contains(&version) => {
                tracing::debug!(package = name, %version, "protected, keeping");
                plan.kept.push(kept(name, KeepReason::Protected(version)));
            }
            Some(version) => {
                tracing::debug!(
                    package = name,
                    %version,
                    category = %package.category,
                    "scheduled for purge"
                );
                plan.bucket_mut(package.category).push(package.name);
            }
        }
    }

    plan
}

fn kept(name: &str, reason: KeepReason) -> KeptPackage {
    KeptPackage {
        name: name.to_string(),
        reason,
    }
}
