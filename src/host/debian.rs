//! `KernelHost` backed by dpkg/apt and coreutils.

use super::KernelHost;
use super::command::{find_program, run_tool};
use crate::config::Config;
use crate::error::{Result, SweepError};
use std::path::PathBuf;
use std::process::Command;

/// dpkg-query exits 1 when some pattern matched no package.
const DPKG_QUERY_NO_MATCH: i32 = 1;

const QUERY_FORMAT: &str = "${db:Status-Abbrev}\t${Package}\n";

/// Host operations on a Debian-family system.
#[derive(Debug, Clone)]
pub struct DebianHost {
    query_program: String,
    package_patterns: Vec<String>,
    purge_argv: Vec<String>,
    usage_mount: PathBuf,
}

impl DebianHost {
    /// Verify every required tool is installed and build the host.
    ///
    /// Fails with `SweepError::MissingTool` naming the first absent tool.
    pub fn detect(config: &Config) -> Result<Self> {
        let purge_argv = config.purge_argv()?;
        let required = [
            config.query_program.as_str(),
            purge_argv[0].as_str(),
            "uname",
            "df",
        ];

        let search_path = std::env::var_os("PATH");
        for tool in required {
            if find_program(tool, search_path.as_deref()).is_none() {
                return Err(SweepError::MissingTool(format!(
                    "{} (is this a Debian-family system?)",
                    tool
                )));
            }
        }

        Ok(Self {
            query_program: config.query_program.clone(),
            package_patterns: config.package_patterns.clone(),
            purge_argv,
            usage_mount: config.usage_mount.clone(),
        })
    }
}

impl KernelHost for DebianHost {
    fn running_release(&self) -> Result<String> {
        let output = run_tool("uname", &["-r"], &[])?;
        if output.stdout.is_empty() {
            return Err(SweepError::CommandFailed(
                "uname -r returned an empty release string".to_string(),
            ));
        }
        Ok(output.stdout)
    }

    fn installed_kernel_packages(&self) -> Result<Vec<String>> {
        let mut args = vec!["-W", "-f", QUERY_FORMAT];
        args.extend(self.package_patterns.iter().map(String::as_str));

        let output = run_tool(&self.query_program, &args, &[DPKG_QUERY_NO_MATCH])?;
        Ok(parse_installed_packages(&output.stdout))
    }

    fn purge(&self, packages: &[String], assume_yes: bool) -> Result<()> {
        let (program, base_args) = self
            .purge_argv
            .split_first()
            .ok_or_else(|| SweepError::UserError("purge_command is empty".to_string()))?;

        let mut command = Command::new(program);
        command.args(base_args);
        if assume_yes {
            command.arg("-y").env("DEBIAN_FRONTEND", "noninteractive");
        }
        command.args(packages);

        tracing::info!(program = %program, count = packages.len(), "purging packages");

        // Inherited stdio: the package manager's progress and prompts stay visible.
        let status = command.status().map_err(|e| {
            SweepError::PurgeFailed(format!("failed to execute {}: {}", program, e))
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(SweepError::PurgeFailed(format!(
                "{} exited with {}",
                program,
                status
                    .code()
                    .map_or_else(|| "a signal".to_string(), |c| format!("code {}", c))
            )))
        }
    }

    fn used_kilobytes(&self) -> Result<u64> {
        let mount = self.usage_mount.to_string_lossy().into_owned();
        let output = run_tool("df", &["-k", "--output=used", mount.as_str()], &[])?;
        parse_df_used(&output.stdout).ok_or_else(|| {
            SweepError::CommandFailed(format!(
                "unexpected df output for {}: {}",
                mount, output.stdout
            ))
        })
    }
}

/// Parse `dpkg-query -W -f '${db:Status-Abbrev}\t${Package}\n'` output.
///
/// Keeps every row whose files are still on disk, including half-configured,
/// unpacked and trigger-pending packages. Rows whose second status letter is
/// `n` (not installed) or `c` (config files only) are dropped, as are
/// duplicates; database order is preserved.
pub(crate) fn parse_installed_packages(stdout: &str) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();

    for line in stdout.lines() {
        let Some((status, name)) = line.split_once('\t') else {
            continue;
        };
        let name = name.trim();
        if matches!(status.chars().nth(1), Some('n' | 'c') | None) || name.is_empty() {
            continue;
        }
        if !packages.iter().any(|p| p == name) {
            packages.push(name.to_string());
        }
    }

    packages
}

/// Parse `df -k --output=used` output: a header line then a number.
pub(crate) fn parse_df_used(stdout: &str) -> Option<u64> {
    stdout.lines().nth(1)?.trim().parse().ok()
}
