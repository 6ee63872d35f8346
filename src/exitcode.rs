//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Names compared unequal
pub const DIFFERENT: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (malformed name or delimiter)
pub const DATAERR: i32 = 65;

/// Internal software error (contract violation)
pub const SOFTWARE: i32 = 70;

/// Configuration error
pub const CONFIG: i32 = 78;
