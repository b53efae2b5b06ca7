/// Standard Unix exit codes for the linkshelf CLI.
///
/// These codes follow the BSD convention (sysexits.h).
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, bad configuration, etc.
pub const USAGE: i32 = 64;

/// The remote service did not accept the change
pub const UNAVAILABLE: i32 = 69;

/// Not signed in, or the session was refused
pub const NOPERM: i32 = 77;

/// Operation was cancelled by user (typically Ctrl+C)
pub const CANCEL: i32 = 130;
