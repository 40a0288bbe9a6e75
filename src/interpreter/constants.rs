// Constants for the naz interpreter

/// Lowest value the register may hold after `a`, `s` or `m`
pub const REGISTER_MIN: i32 = -127;

/// Highest value the register may hold after `a`, `s` or `m`
pub const REGISTER_MAX: i32 = 127;

/// Number of function slots, addressed by the digits 0-9
pub const FUNCTION_SLOTS: usize = 10;

/// How deeply function replay may nest before the run is aborted
pub const MAX_CALL_DEPTH: usize = 256;

/// Default memory budget for recorded snapshots (64 MiB estimate)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;
