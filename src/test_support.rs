use crate::config::Config;
use crate::error::{Result, SweepError};
use crate::host::KernelHost;
use std::cell::RefCell;
use std::path::Path;
use tempfile::TempDir;

/// In-memory `KernelHost` recording every purge request.
pub(crate) struct FakeHost {
    release: String,
    packages: RefCell<Vec<String>>,
    used_kb: RefCell<Vec<u64>>,
    purge_error: Option<String>,
    pub(crate) purges: RefCell<Vec<(Vec<String>, bool)>>,
}

impl FakeHost {
    pub(crate) fn new(release: &str, packages: &[&str]) -> Self {
        Self {
            release: release.to_string(),
            packages: RefCell::new(packages.iter().map(|p| p.to_string()).collect()),
            used_kb: RefCell::new(Vec::new()),
            purge_error: None,
            purges: RefCell::new(Vec::new()),
        }
    }

    /// Successive `used_kilobytes` readings; errors once exhausted.
    pub(crate) fn with_usage(self, readings: &[u64]) -> Self {
        *self.used_kb.borrow_mut() = readings.iter().rev().copied().collect();
        self
    }

    pub(crate) fn failing_purge(mut self, message: &str) -> Self {
        self.purge_error = Some(message.to_string());
        self
    }

    pub(crate) fn installed(&self) -> Vec<String> {
        self.packages.borrow().clone()
    }
}

impl KernelHost for FakeHost {
    fn running_release(&self) -> Result<String> {
        Ok(self.release.clone())
    }

    fn installed_kernel_packages(&self) -> Result<Vec<String>> {
        Ok(self.installed())
    }

    fn purge(&self, packages: &[String], assume_yes: bool) -> Result<()> {
        self.purges
            .borrow_mut()
            .push((packages.to_vec(), assume_yes));

        if let Some(message) = &self.purge_error {
            return Err(SweepError::PurgeFailed(message.clone()));
        }
        self.packages
            .borrow_mut()
            .retain(|installed| !packages.contains(installed));
        Ok(())
    }

    fn used_kilobytes(&self) -> Result<u64> {
        self.used_kb
            .borrow_mut()
            .pop()
            .ok_or_else(|| SweepError::CommandFailed("df unavailable".to_string()))
    }
}

/// A config whose sweep roots live under `root` and whose audit log is
/// `root/events.ndjson`.
pub(crate) fn sandbox_config(root: &Path) -> Config {
    Config {
        sweep_roots: vec![
            root.join("usr/src"),
            root.join("usr/lib/modules"),
            root.join("usr/lib/linux-tools-*"),
        ],
        event_log: Some(root.join("events.ndjson")),
        ..Config::default()
    }
}

/// Create a temporary tree of kernel directories relative to its root.
pub(crate) fn create_kernel_tree(dirs: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for dir in dirs {
        let path = temp_dir.path().join(dir);
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join(".keep"), "").unwrap();
    }
    temp_dir
}
