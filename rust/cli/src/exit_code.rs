//! Process exit statuses shared by every command.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Usage, configuration, engine or I/O failure.
pub const ERROR: i32 = 2;

/// Stopped before finishing (player quit or simulation break).
pub const INTERRUPTED: i32 = 130;
