//! Exit code constants for kernel-sweep.
//!
//! - 0: Success (including help, nothing to do, and user abort)
//! - 1: User error (invalid or unreadable configuration)
//! - 2: Usage error (unknown or malformed flag)
//! - 3: A required external tool is missing
//! - 4: Package manager or inspection command failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: invalid configuration or unreadable config file.
pub const USER_ERROR: i32 = 1;

/// Usage error: unknown or malformed command-line arguments.
pub const USAGE_ERROR: i32 = 2;

/// A required external tool could not be found on the host.
pub const MISSING_TOOL: i32 = 3;

/// Package query, purge, or system inspection failed.
pub const COMMAND_FAILURE: i32 = 4;
