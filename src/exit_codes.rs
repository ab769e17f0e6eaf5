//! Exit code constants for the nsprep CLI.
//!
//! - 0: Success
//! - 1: User error (invalid config, unusable working directory)
//! - 2: Command-line usage error (reported by clap, never by nsprep itself)
//! - 3: Render failure (missing field, malformed placeholder)
//! - 4: Filesystem failure (template unreadable, output unwritable)
//!
//! Git failures never reach the exit code: an unresolvable branch falls back
//! to the default binding, and a missing repository falls back to the
//! working directory as project root.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: an invalid config file or working directory.
pub const USER_ERROR: i32 = 1;

/// Exit code clap uses for command-line usage errors.
pub const USAGE_ERROR: i32 = 2;

/// Render failure: a placeholder could not be substituted.
pub const RENDER_FAILURE: i32 = 3;

/// Filesystem failure: the template could not be read or the output written.
pub const IO_FAILURE: i32 = 4;

/// Exit code for a failed argument parse: success for `--help`/`--version`,
/// the usage code otherwise.
pub fn for_parse_error(err: &clap::Error) -> i32 {
    if err.use_stderr() { USAGE_ERROR } else { SUCCESS }
}
